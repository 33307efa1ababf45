//! `ShareCode` Core Library
//!
//! This crate provides the core of `ShareCode`: publishing a piece of source
//! text to a code-sharing service and re-opening previously shared content.
//! It covers service selection and ranking, per-service configuration
//! caching, the share/open flows and the local staging area.

pub mod config;
pub mod datetime;
pub mod error;
pub mod host;
pub mod models;
pub mod service;
pub mod share;
pub mod staging;

pub use config::{
    AppSettings, ConfigKey, ConfigManager, MemorySettingsStore, ServiceConfiguration,
    SettingsStore, TomlSettingsStore,
};
pub use error::{
    ConfigError, ConfigResult, ServiceError, ServiceResult, StagingError, StagingResult,
};
pub use host::{
    BrowserOpener, DocumentViewer, EnglishLabels, Host, Labels, Notifier, PickItem, Picker,
    TextSource,
};
pub use models::Snippet;
pub use service::{
    rank_candidates, BuiltinCatalog, GithubService, GitlabService, PastebinService, Service,
    ServiceCatalog, ServiceDescriptor, ServiceKind,
};
pub use share::{OpenOutcome, ShareCode, ShareOutcome};
pub use staging::StagingArea;
