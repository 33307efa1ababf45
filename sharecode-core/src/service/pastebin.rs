//! Pastebin backend
//!
//! Scope `shareCode.pastebin`:
//! - `authtoken`: developer API key, needed in both modes
//! - `username`: the account's API user key, needed to paste as the account
//!   and to list pastes
//! - `baseurl`: optional, defaults to `https://pastebin.com`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::{ConfigKey, ServiceConfiguration, SettingsStore};
use crate::datetime;
use crate::error::{ServiceError, ServiceResult};
use crate::host::{Host, PickItem};
use crate::models::Snippet;
use crate::staging::StagingArea;

use super::backend::Service;
use super::http;
use super::ServiceKind;

const DEFAULT_BASE_URL: &str = "https://pastebin.com";

/// Number of pastes requested when listing
const LIST_LIMIT: &str = "100";

/// Prefix Pastebin puts in front of every API error message
const BAD_REQUEST: &str = "Bad API request";

/// Pastebin, anonymous or as the configured account
pub struct PastebinService {
    anonymous: bool,
    config: ServiceConfiguration,
    staging: StagingArea,
    client: Client,
}

/// One entry of the paste list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasteEntry {
    /// Paste key, the last segment of its URL
    pub paste_key: String,
    /// Creation time, Unix seconds
    #[serde(default)]
    pub paste_date: String,
    /// Title, may be empty
    #[serde(default)]
    pub paste_title: String,
}

#[derive(Debug, Deserialize)]
struct PasteList {
    #[serde(rename = "paste", default)]
    pastes: Vec<PasteEntry>,
}

impl PastebinService {
    /// Creates the backend with its own configuration cache
    #[must_use]
    pub fn new(anonymous: bool, store: Arc<dyn SettingsStore>, staging_root: &Path) -> Self {
        let scope = ServiceKind::Pastebin.scope();
        Self {
            anonymous,
            config: ServiceConfiguration::new(scope, store),
            staging: StagingArea::new(staging_root, scope),
            client: http::client(),
        }
    }

    fn base_url(&self) -> String {
        self.config
            .get(ConfigKey::BaseUrl)
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), |b| http::trim_base(&b))
    }

    fn dev_key(&self) -> Option<SecretString> {
        self.config.get(ConfigKey::AuthToken).map(SecretString::from)
    }

    fn user_key(&self) -> Option<SecretString> {
        self.config.get(ConfigKey::Username).map(SecretString::from)
    }

    fn require_dev_key(&self) -> ServiceResult<SecretString> {
        self.dev_key()
            .ok_or_else(|| ServiceError::NotConfigured("pastebin developer key (authtoken)".into()))
    }

    fn require_user_key(&self) -> ServiceResult<SecretString> {
        self.user_key()
            .ok_or_else(|| ServiceError::NotConfigured("pastebin user key (username)".into()))
    }

    async fn post(&self, endpoint: &str, form: &[(&str, &str)]) -> ServiceResult<String> {
        let response = self
            .client
            .post(format!("{}/api/{endpoint}", self.base_url()))
            .form(form)
            .send()
            .await
            .map_err(|e| http::network(&e))?;
        let body = http::text(response).await?;
        check_api_body(body)
    }
}

/// Maps a Pastebin format name from an editor language identifier
#[must_use]
pub fn paste_format(language_id: &str) -> &str {
    match language_id {
        "plaintext" | "" => "text",
        "shellscript" => "bash",
        "objective-c" => "objc",
        "javascriptreact" => "javascript",
        "typescriptreact" => "typescript",
        other => other,
    }
}

/// Pastebin reports errors with status 200 and a `Bad API request` body
fn check_api_body(body: String) -> ServiceResult<String> {
    if !body.starts_with(BAD_REQUEST) {
        return Ok(body);
    }
    let lower = body.to_lowercase();
    if lower.contains("api_dev_key") || lower.contains("api_user_key") {
        Err(ServiceError::Auth(body))
    } else if lower.contains("maximum") {
        Err(ServiceError::Quota(body))
    } else {
        Err(ServiceError::Rejected { status: 200, body })
    }
}

/// Parses the XML fragment returned by `api_option=list`
///
/// # Errors
/// Returns `ServiceError::InvalidResponse` if the fragment is malformed
pub fn parse_paste_list(body: &str) -> ServiceResult<Vec<PasteEntry>> {
    if body.trim().starts_with("No pastes found") {
        return Ok(Vec::new());
    }
    let wrapped = format!("<pastes>{body}</pastes>");
    quick_xml::de::from_str::<PasteList>(&wrapped)
        .map(|list| list.pastes)
        .map_err(|e| ServiceError::InvalidResponse(format!("paste list: {e}")))
}

#[async_trait]
impl Service for PastebinService {
    async fn upload(&self, snippet: Snippet) -> ServiceResult<String> {
        let dev_key = self.require_dev_key()?;
        let user_key = if self.anonymous {
            None
        } else {
            Some(self.require_user_key()?)
        };

        let mut form = vec![
            ("api_dev_key", dev_key.expose_secret()),
            ("api_option", "paste"),
            ("api_paste_code", snippet.content()),
            ("api_paste_name", snippet.file_name()),
            ("api_paste_format", paste_format(snippet.format_tag())),
            ("api_paste_private", "1"),
        ];
        if let Some(user_key) = &user_key {
            form.push(("api_user_key", user_key.expose_secret()));
        }

        let url = self.post("api_post.php", &form).await?.trim().to_string();
        if !url.starts_with("http") {
            return Err(ServiceError::InvalidResponse(format!(
                "expected paste URL, got {url:?}"
            )));
        }
        tracing::info!(service = "pastebin", anonymous = self.anonymous, %url, "Published paste");
        Ok(url)
    }

    async fn open(&self, host: &Host) -> ServiceResult<Option<PathBuf>> {
        if self.anonymous {
            return Err(ServiceError::NotConfigured(
                "anonymous pastes cannot be listed".into(),
            ));
        }
        let dev_key = self.require_dev_key()?;
        let user_key = self.require_user_key()?;

        let body = self
            .post(
                "api_post.php",
                &[
                    ("api_dev_key", dev_key.expose_secret()),
                    ("api_user_key", user_key.expose_secret()),
                    ("api_option", "list"),
                    ("api_results_limit", LIST_LIMIT),
                ],
            )
            .await?;
        let pastes = parse_paste_list(&body)?;
        if pastes.is_empty() {
            return Ok(None);
        }

        let items: Vec<PickItem> = pastes
            .iter()
            .map(|p| {
                let label = if p.paste_title.is_empty() {
                    &p.paste_key
                } else {
                    &p.paste_title
                };
                PickItem::new(label.as_str()).with_description(datetime::format_unix(&p.paste_date))
            })
            .collect();
        let Some(paste) = host.picker.pick(&items).await.and_then(|i| pastes.get(i)) else {
            return Ok(None);
        };

        let content = self
            .post(
                "api_raw.php",
                &[
                    ("api_dev_key", dev_key.expose_secret()),
                    ("api_user_key", user_key.expose_secret()),
                    ("api_option", "show_paste"),
                    ("api_paste_key", paste.paste_key.as_str()),
                ],
            )
            .await?;

        let filename =
            http::staged_file_name(&paste.paste_title, &format!("{}.txt", paste.paste_key));
        let path = self.staging.save_file(&paste.paste_key, &filename, &content)?;
        http::show(host, &path)?;
        Ok(Some(path))
    }

    fn is_not_configured(&self) -> bool {
        self.dev_key().is_none() || (!self.anonymous && self.user_key().is_none())
    }

    fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}
