//! GitHub Gist backend
//!
//! Scope `shareCode.github`:
//! - `username`: account whose gists are listed by `open`
//! - `authtoken`: personal access token with the `gist` scope
//! - `baseurl`: optional API root, defaults to `https://api.github.com`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigKey, ServiceConfiguration, SettingsStore};
use crate::datetime;
use crate::error::{ServiceError, ServiceResult};
use crate::host::{Host, PickItem};
use crate::models::{Snippet, FALLBACK_FILE_NAME};
use crate::staging::StagingArea;

use super::backend::Service;
use super::http;
use super::ServiceKind;

const DEFAULT_API_URL: &str = "https://api.github.com";
const GITHUB_JSON: &str = "application/vnd.github+json";

/// GitHub gists, anonymous or as the configured account
pub struct GithubService {
    anonymous: bool,
    config: ServiceConfiguration,
    staging: StagingArea,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GistFileContent<'a> {
    content: &'a str,
}

/// Body of a gist creation request
#[derive(Debug, Serialize)]
pub struct NewGist<'a> {
    description: &'a str,
    public: bool,
    files: BTreeMap<&'a str, GistFileContent<'a>>,
}

#[derive(Debug, Deserialize)]
struct CreatedGist {
    html_url: String,
}

/// A gist as returned by the list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Gist {
    /// Gist identifier
    pub id: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Creation time, RFC 3339
    #[serde(default)]
    pub created_at: String,
    /// Files keyed by file name
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
}

/// One file of a listed gist
#[derive(Debug, Clone, Deserialize)]
pub struct GistFile {
    /// File name
    pub filename: String,
    /// URL of the raw content
    pub raw_url: String,
}

impl Gist {
    /// Label shown in the picker: description, else the first file name
    #[must_use]
    pub fn label(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => self
                .files
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| self.id.clone()),
        }
    }
}

/// Builds the creation request for `snippet`
///
/// Anonymous gists are public; gists created for the account are secret.
#[must_use]
pub fn new_gist(snippet: &Snippet, anonymous: bool) -> NewGist<'_> {
    let mut files = BTreeMap::new();
    files.insert(
        snippet.file_name(),
        GistFileContent {
            content: snippet.content(),
        },
    );
    NewGist {
        description: snippet.file_name(),
        public: anonymous,
        files,
    }
}

impl GithubService {
    /// Creates the backend with its own configuration cache
    #[must_use]
    pub fn new(anonymous: bool, store: Arc<dyn SettingsStore>, staging_root: &Path) -> Self {
        let scope = ServiceKind::Github.scope();
        Self {
            anonymous,
            config: ServiceConfiguration::new(scope, store),
            staging: StagingArea::new(staging_root, scope),
            client: http::client(),
        }
    }

    fn api_url(&self) -> String {
        self.config
            .get(ConfigKey::BaseUrl)
            .map_or_else(|| DEFAULT_API_URL.to_string(), |b| http::trim_base(&b))
    }

    fn token(&self) -> Option<SecretString> {
        self.config.get(ConfigKey::AuthToken).map(SecretString::from)
    }

    fn username(&self) -> Option<String> {
        self.config.get(ConfigKey::Username)
    }

    fn authorize(request: RequestBuilder, token: &SecretString) -> RequestBuilder {
        request.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()))
    }

    fn credentials(&self) -> ServiceResult<(String, SecretString)> {
        match (self.username(), self.token()) {
            (Some(username), Some(token)) => Ok((username, token)),
            _ => Err(ServiceError::NotConfigured(
                "github username and authtoken".into(),
            )),
        }
    }
}

#[async_trait]
impl Service for GithubService {
    async fn upload(&self, snippet: Snippet) -> ServiceResult<String> {
        let mut request = self
            .client
            .post(format!("{}/gists", self.api_url()))
            .header(ACCEPT, GITHUB_JSON)
            .json(&new_gist(&snippet, self.anonymous));
        if !self.anonymous {
            let (_, token) = self.credentials()?;
            request = Self::authorize(request, &token);
        }

        let response = request.send().await.map_err(|e| http::network(&e))?;
        let created: CreatedGist = http::json(response).await?;

        tracing::info!(service = "github", anonymous = self.anonymous, url = %created.html_url, "Published gist");
        Ok(created.html_url)
    }

    async fn open(&self, host: &Host) -> ServiceResult<Option<PathBuf>> {
        if self.anonymous {
            return Err(ServiceError::NotConfigured(
                "anonymous gists cannot be listed".into(),
            ));
        }
        let (username, token) = self.credentials()?;
        let api = self.api_url();

        let request = self
            .client
            .get(format!("{api}/users/{username}/gists"))
            .header(ACCEPT, GITHUB_JSON);
        let response = Self::authorize(request, &token)
            .send()
            .await
            .map_err(|e| http::network(&e))?;
        let gists: Vec<Gist> = http::json(response).await?;
        if gists.is_empty() {
            return Ok(None);
        }

        let items: Vec<PickItem> = gists
            .iter()
            .map(|g| PickItem::new(g.label()).with_description(datetime::format_date(&g.created_at)))
            .collect();
        let Some(gist) = host.picker.pick(&items).await.and_then(|i| gists.get(i)) else {
            return Ok(None);
        };

        let mut first = None;
        for file in gist.files.values() {
            let request = self.client.get(&file.raw_url);
            let response = Self::authorize(request, &token)
                .send()
                .await
                .map_err(|e| http::network(&e))?;
            let content = http::text(response).await?;

            let filename = http::staged_file_name(&file.filename, FALLBACK_FILE_NAME);
            let path = self.staging.save_file(&gist.id, &filename, &content)?;
            if first.is_none() {
                first = Some(path);
            }
        }

        if let Some(path) = &first {
            http::show(host, path)?;
        }
        Ok(first)
    }

    fn is_not_configured(&self) -> bool {
        !self.anonymous && (self.username().is_none() || self.token().is_none())
    }

    fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}
