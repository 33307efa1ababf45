//! Snippet model for content being published.

use serde::{Deserialize, Serialize};

use crate::host::TextSource;

/// File name used by services when a snippet has an empty name
pub const FALLBACK_FILE_NAME: &str = "snippet.txt";

/// A unit of text selected for publishing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    name: String,
    content: String,
    format_tag: String,
}

impl Snippet {
    /// Creates a snippet, deriving its name from `raw_path`
    #[must_use]
    pub fn new(raw_path: &str, content: impl Into<String>, format_tag: impl Into<String>) -> Self {
        Self {
            name: Self::file_name_from_path(raw_path),
            content: content.into(),
            format_tag: format_tag.into(),
        }
    }

    /// Builds a snippet from the current state of a text source
    ///
    /// An empty selection publishes the whole document. The language tag is
    /// always the document's.
    #[must_use]
    pub fn from_source(source: &dyn TextSource) -> Self {
        let content = source
            .selected_text()
            .unwrap_or_else(|| source.document_text());
        Self::new(&source.uri_path(), content, source.language_id())
    }

    /// Returns the part of `raw_path` after its last `\` or `/`
    ///
    /// Both separators are honored whatever the host platform. A path ending
    /// in a separator yields an empty name: empty segments are not skipped,
    /// so `a/b/` names `""` rather than `b`.
    #[must_use]
    pub fn file_name_from_path(raw_path: &str) -> String {
        let after_backslash = raw_path.rsplit('\\').next().unwrap_or_default();
        after_backslash
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// File name (last path segment of the source document)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name to use remotely, never empty
    #[must_use]
    pub fn file_name(&self) -> &str {
        if self.name.is_empty() {
            FALLBACK_FILE_NAME
        } else {
            &self.name
        }
    }

    /// Text being published
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Language identifier of the source document
    #[must_use]
    pub fn format_tag(&self) -> &str {
        &self.format_tag
    }
}
