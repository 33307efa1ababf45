//! GitLab snippet backend
//!
//! Scope `shareCode.gitlab`:
//! - `authtoken`: personal access token with the `api` scope
//! - `baseurl`: instance root, defaults to `https://gitlab.com`
//!
//! GitLab has no anonymous snippets, so this backend only exists in
//! authenticated form.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigKey, ServiceConfiguration, SettingsStore};
use crate::datetime;
use crate::error::{ServiceError, ServiceResult};
use crate::host::{Host, PickItem};
use crate::models::Snippet;
use crate::staging::StagingArea;

use super::backend::Service;
use super::http;
use super::ServiceKind;

const DEFAULT_BASE_URL: &str = "https://gitlab.com";
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Personal snippets on a GitLab instance
pub struct GitlabService {
    config: ServiceConfiguration,
    staging: StagingArea,
    client: Client,
}

/// Body of a snippet creation request
#[derive(Debug, Serialize)]
pub struct NewSnippet<'a> {
    title: &'a str,
    file_name: &'a str,
    content: &'a str,
    visibility: &'static str,
}

#[derive(Debug, Deserialize)]
struct CreatedSnippet {
    web_url: String,
}

/// A snippet as returned by the list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSnippet {
    /// Snippet identifier
    pub id: u64,
    /// Title
    #[serde(default)]
    pub title: String,
    /// File name, absent on multi-file snippets
    #[serde(default)]
    pub file_name: Option<String>,
    /// Creation time, RFC 3339
    #[serde(default)]
    pub created_at: String,
}

/// Builds the creation request for `snippet`
#[must_use]
pub fn new_snippet(snippet: &Snippet) -> NewSnippet<'_> {
    NewSnippet {
        title: snippet.file_name(),
        file_name: snippet.file_name(),
        content: snippet.content(),
        visibility: "private",
    }
}

impl GitlabService {
    /// Creates the backend with its own configuration cache
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>, staging_root: &Path) -> Self {
        let scope = ServiceKind::Gitlab.scope();
        Self {
            config: ServiceConfiguration::new(scope, store),
            staging: StagingArea::new(staging_root, scope),
            client: http::client(),
        }
    }

    fn api_url(&self) -> String {
        let base = self
            .config
            .get(ConfigKey::BaseUrl)
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), |b| http::trim_base(&b));
        format!("{base}/api/v4")
    }

    fn token(&self) -> Option<SecretString> {
        self.config.get(ConfigKey::AuthToken).map(SecretString::from)
    }

    fn require_token(&self) -> ServiceResult<SecretString> {
        self.token()
            .ok_or_else(|| ServiceError::NotConfigured("gitlab authtoken".into()))
    }

    fn authorize(request: RequestBuilder, token: &SecretString) -> RequestBuilder {
        request.header(TOKEN_HEADER, token.expose_secret())
    }
}

#[async_trait]
impl Service for GitlabService {
    async fn upload(&self, snippet: Snippet) -> ServiceResult<String> {
        let token = self.require_token()?;
        let request = self
            .client
            .post(format!("{}/snippets", self.api_url()))
            .json(&new_snippet(&snippet));

        let response = Self::authorize(request, &token)
            .send()
            .await
            .map_err(|e| http::network(&e))?;
        let created: CreatedSnippet = http::json(response).await?;

        tracing::info!(service = "gitlab", url = %created.web_url, "Published snippet");
        Ok(created.web_url)
    }

    async fn open(&self, host: &Host) -> ServiceResult<Option<PathBuf>> {
        let token = self.require_token()?;
        let api = self.api_url();

        let request = self.client.get(format!("{api}/snippets"));
        let response = Self::authorize(request, &token)
            .send()
            .await
            .map_err(|e| http::network(&e))?;
        let snippets: Vec<RemoteSnippet> = http::json(response).await?;
        if snippets.is_empty() {
            return Ok(None);
        }

        let items: Vec<PickItem> = snippets
            .iter()
            .map(|s| PickItem::new(s.title.as_str()).with_description(datetime::format_date(&s.created_at)))
            .collect();
        let Some(remote) = host.picker.pick(&items).await.and_then(|i| snippets.get(i)) else {
            return Ok(None);
        };

        let request = self.client.get(format!("{api}/snippets/{}/raw", remote.id));
        let response = Self::authorize(request, &token)
            .send()
            .await
            .map_err(|e| http::network(&e))?;
        let content = http::text(response).await?;

        let id = remote.id.to_string();
        let raw_name = remote.file_name.as_deref().unwrap_or(&remote.title);
        let filename = http::staged_file_name(raw_name, &format!("{id}.txt"));
        let path = self.staging.save_file(&id, &filename, &content)?;
        http::show(host, &path)?;
        Ok(Some(path))
    }

    fn is_not_configured(&self) -> bool {
        self.token().is_none()
    }

    fn is_anonymous(&self) -> bool {
        false
    }
}
