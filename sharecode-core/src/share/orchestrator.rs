//! Share and open flows
//!
//! Both flows are linear and keep no state between invocations:
//! - share: snapshot the document, pick a service (anonymous ones included),
//!   upload, then notify and optionally open the URL in the browser
//! - open: pick a non-anonymous service and let it retrieve and show an item
//!
//! Declining the picker ends a flow quietly. Service failures are logged and
//! reported through the host notifier; they never escape as errors.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SettingsStore;
use crate::error::ServiceError;
use crate::host::{label_keys, Host, PickItem, TextSource};
use crate::models::Snippet;
use crate::service::{rank_candidates, ServiceCatalog, ServiceDescriptor};

/// How a share flow ended
#[derive(Debug)]
pub enum ShareOutcome {
    /// The user declined the picker
    Cancelled,
    /// The snippet was published
    Published {
        /// Label of the chosen service
        service: String,
        /// URL of the published snippet
        url: String,
    },
    /// The chosen service failed; the user has been notified
    Failed {
        /// Label of the chosen service
        service: String,
        /// What went wrong
        error: ServiceError,
    },
}

/// How an open flow ended
#[derive(Debug)]
pub enum OpenOutcome {
    /// The user declined the service picker
    Cancelled,
    /// The service finished; `path` is `None` if nothing was chosen there
    Opened {
        /// Label of the chosen service
        service: String,
        /// Staged file that was shown
        path: Option<PathBuf>,
    },
    /// The chosen service failed; the user has been notified
    Failed {
        /// Label of the chosen service
        service: String,
        /// What went wrong
        error: ServiceError,
    },
}

/// Drives the share and open flows against a host
pub struct ShareCode {
    host: Host,
    catalog: Arc<dyn ServiceCatalog>,
    settings: Arc<dyn SettingsStore>,
}

impl ShareCode {
    /// Creates the orchestrator
    #[must_use]
    pub fn new(host: Host, catalog: Arc<dyn ServiceCatalog>, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            host,
            catalog,
            settings,
        }
    }

    /// Builds the ranked candidate list
    ///
    /// Services are instantiated afresh on every call.
    #[must_use]
    pub fn candidates(&self, with_anonymous: bool) -> Vec<ServiceDescriptor> {
        rank_candidates(self.catalog.services(), with_anonymous)
    }

    /// Picker entries for `candidates`, marking services that need setup
    #[must_use]
    pub fn pick_items(&self, candidates: &[ServiceDescriptor]) -> Vec<PickItem> {
        let not_configured = self.host.labels.t(label_keys::NOT_CONFIGURED);
        candidates
            .iter()
            .map(|d| {
                let item = PickItem::new(d.label.as_str());
                if d.service.is_not_configured() {
                    item.with_description(not_configured.as_str())
                } else {
                    item
                }
            })
            .collect()
    }

    async fn pick_service(&self, with_anonymous: bool) -> Option<ServiceDescriptor> {
        let mut candidates = self.candidates(with_anonymous);
        let items = self.pick_items(&candidates);
        let index = self.host.picker.pick(&items).await?;
        (index < candidates.len()).then(|| candidates.swap_remove(index))
    }

    /// Runs the share flow on the current state of `source`
    pub async fn share(&self, source: &dyn TextSource) -> ShareOutcome {
        let snippet = Snippet::from_source(source);
        self.share_snippet(snippet).await
    }

    /// Runs the share flow for an already built snippet
    pub async fn share_snippet(&self, snippet: Snippet) -> ShareOutcome {
        let Some(chosen) = self.pick_service(true).await else {
            tracing::debug!("Share cancelled");
            return ShareOutcome::Cancelled;
        };

        tracing::debug!(service = %chosen.label, name = snippet.name(), "Uploading snippet");
        match chosen.service.upload(snippet).await {
            Ok(url) => {
                tracing::info!(service = %chosen.label, %url, "Snippet published");
                self.show_url_and_open(&url);
                ShareOutcome::Published {
                    service: chosen.label,
                    url,
                }
            }
            Err(error) => {
                tracing::warn!(service = %chosen.label, "Upload failed: {error}");
                self.host
                    .notifier
                    .error(&format!("{}{error}", self.host.labels.t(label_keys::UPLOAD_FAILED)));
                ShareOutcome::Failed {
                    service: chosen.label,
                    error,
                }
            }
        }
    }

    /// Runs the open flow
    pub async fn open(&self) -> OpenOutcome {
        let Some(chosen) = self.pick_service(false).await else {
            tracing::debug!("Open cancelled");
            return OpenOutcome::Cancelled;
        };

        match chosen.service.open(&self.host).await {
            Ok(path) => {
                tracing::info!(service = %chosen.label, path = ?path, "Open finished");
                OpenOutcome::Opened {
                    service: chosen.label,
                    path,
                }
            }
            Err(error) => {
                tracing::warn!(service = %chosen.label, "Open failed: {error}");
                self.host
                    .notifier
                    .error(&format!("{}{error}", self.host.labels.t(label_keys::OPEN_FAILED)));
                OpenOutcome::Failed {
                    service: chosen.label,
                    error,
                }
            }
        }
    }

    fn show_url_and_open(&self, url: &str) {
        self.host
            .notifier
            .info(&format!("{}{url}", self.host.labels.t(label_keys::PUBLISHED_MESSAGE)));
        if self.settings.open_shared_code_in_browser() {
            self.host.browser.open_url(url);
        }
    }
}
