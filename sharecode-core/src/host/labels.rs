//! Display label lookup

/// Label keys used by the core
pub mod label_keys {
    pub const PASTEBIN_SERVICE: &str = "pastebin.service";
    pub const PASTEBIN_SERVICE_ANONYMOUS: &str = "pastebin.serviceAnym";
    pub const GITHUB_SERVICE: &str = "github.service";
    pub const GITHUB_SERVICE_ANONYMOUS: &str = "github.serviceAnym";
    pub const GITLAB_SERVICE: &str = "gitlab.service";
    pub const PUBLISHED_MESSAGE: &str = "publishedMessage";
    pub const NOT_CONFIGURED: &str = "notConfigured";
    pub const UPLOAD_FAILED: &str = "uploadFailed";
    pub const OPEN_FAILED: &str = "openFailed";
}

/// Looks up display strings by key
pub trait Labels: Send + Sync {
    /// Returns the string for `key`
    fn t(&self, key: &str) -> String;
}

/// Built-in English strings; unknown keys are returned unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl Labels for EnglishLabels {
    fn t(&self, key: &str) -> String {
        let text = match key {
            label_keys::PASTEBIN_SERVICE => "Pastebin",
            label_keys::PASTEBIN_SERVICE_ANONYMOUS => "Pastebin (anonymous)",
            label_keys::GITHUB_SERVICE => "GitHub Gist",
            label_keys::GITHUB_SERVICE_ANONYMOUS => "GitHub Gist (anonymous)",
            label_keys::GITLAB_SERVICE => "GitLab Snippet",
            label_keys::PUBLISHED_MESSAGE => "Code published: ",
            label_keys::NOT_CONFIGURED => "not configured",
            label_keys::UPLOAD_FAILED => "Upload failed: ",
            label_keys::OPEN_FAILED => "Could not open shared code: ",
            other => other,
        };
        text.to_string()
    }
}
