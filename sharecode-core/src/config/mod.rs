//! Configuration management for `ShareCode`
//!
//! This module provides the `ConfigManager` for the TOML settings file, the
//! `SettingsStore` abstraction over persistent scoped values, and the
//! per-service `ServiceConfiguration` cache.

mod manager;
mod scope;
pub mod settings;
mod store;

pub use manager::ConfigManager;
pub use scope::{ConfigKey, ServiceConfiguration, SCOPE_PREFIX};
pub use settings::{AppSettings, LoggingSettings, ScopeValues, ShareSettings, StagingSettings};
pub use store::{MemorySettingsStore, SettingsStore, TomlSettingsStore};
