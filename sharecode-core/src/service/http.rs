//! HTTP plumbing shared by the backends

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::error::{ServiceError, ServiceResult};
use crate::host::Host;
use crate::models::Snippet;

const USER_AGENT: &str = concat!("sharecode/", env!("CARGO_PKG_VERSION"));

/// Builds the client used by a backend
pub(crate) fn client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {e}");
            Client::new()
        })
}

/// Maps a transport failure
pub(crate) fn network(e: &reqwest::Error) -> ServiceError {
    ServiceError::Network(e.to_string())
}

/// Maps a non-success status to the matching error
pub(crate) fn classify_status(status: StatusCode, body: String) -> ServiceError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ServiceError::Auth(format!("status {status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => ServiceError::Quota(body),
        _ => ServiceError::Rejected {
            status: status.as_u16(),
            body,
        },
    }
}

/// Passes successful responses through, turns the rest into errors
pub(crate) async fn check_status(response: Response) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, body))
}

/// Reads a successful response body as text
pub(crate) async fn text(response: Response) -> ServiceResult<String> {
    check_status(response)
        .await?
        .text()
        .await
        .map_err(|e| network(&e))
}

/// Reads a successful response body as JSON
pub(crate) async fn json<T: serde::de::DeserializeOwned>(response: Response) -> ServiceResult<T> {
    check_status(response)
        .await?
        .json()
        .await
        .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
}

/// Strips trailing slashes from a configured base URL
pub(crate) fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

/// Reduces a remote title or file name to a single, non-empty path segment
pub(crate) fn staged_file_name(raw: &str, fallback: &str) -> String {
    let name = Snippet::file_name_from_path(raw.trim());
    if name.is_empty() || name == "." || name == ".." {
        fallback.to_string()
    } else {
        name
    }
}

/// Hands a staged file to the host viewer
pub(crate) fn show(host: &Host, path: &Path) -> ServiceResult<()> {
    host.viewer.show(path).map_err(ServiceError::Viewer)
}
