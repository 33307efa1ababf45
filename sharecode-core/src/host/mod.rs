//! Host environment interfaces
//!
//! The core never talks to a terminal, an editor or a browser directly. A host
//! (the CLI, an editor plugin, a test) supplies these narrow capabilities.

mod labels;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

pub use labels::{label_keys, EnglishLabels, Labels};

/// Current document and selection of the host editor
pub trait TextSource {
    /// Full text of the document
    fn document_text(&self) -> String;

    /// Selected text, `None` when the selection is empty
    fn selected_text(&self) -> Option<String>;

    /// Language identifier of the document (e.g. `python`)
    fn language_id(&self) -> String;

    /// Path of the document, in whatever separator style the host uses
    fn uri_path(&self) -> String;
}

/// One entry presented by a `Picker`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    /// Main text of the entry
    pub label: String,
    /// Secondary text, may be empty
    pub description: String,
}

impl PickItem {
    /// Creates an item with an empty description
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
        }
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Lets the user choose one entry of a list
#[async_trait]
pub trait Picker: Send + Sync {
    /// Returns the index of the chosen item, `None` if the user cancelled
    async fn pick(&self, items: &[PickItem]) -> Option<usize>;
}

/// Shows messages to the user
pub trait Notifier: Send + Sync {
    /// Informational message
    fn info(&self, message: &str);

    /// Error message
    fn error(&self, message: &str);
}

/// Opens URLs in the default handler, fire-and-forget
pub trait BrowserOpener: Send + Sync {
    /// Opens `url`
    fn open_url(&self, url: &str);
}

/// Displays a staged local file
pub trait DocumentViewer: Send + Sync {
    /// Shows the file at `path`
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be shown
    fn show(&self, path: &Path) -> std::io::Result<()>;
}

/// Bundle of host capabilities handed to the orchestrator and services
#[derive(Clone)]
pub struct Host {
    /// List picker
    pub picker: Arc<dyn Picker>,
    /// Message sink
    pub notifier: Arc<dyn Notifier>,
    /// URL opener
    pub browser: Arc<dyn BrowserOpener>,
    /// Staged file viewer
    pub viewer: Arc<dyn DocumentViewer>,
    /// Label lookup
    pub labels: Arc<dyn Labels>,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}
