//! Application settings model
//!
//! This module defines the settings stored in settings.toml.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Values stored for one configuration scope, keyed by configuration key
pub type ScopeValues = BTreeMap<String, String>;

/// Application-wide settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Share flow settings
    #[serde(default)]
    pub share: ShareSettings,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Staging area settings
    #[serde(default)]
    pub staging: StagingSettings,
    /// Per-service values, keyed by dotted scope name (`shareCode.github`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, ScopeValues>,
}

impl AppSettings {
    /// Returns the stored value for `key` in `scope`, if any
    #[must_use]
    pub fn scope_value(&self, scope: &str, key: &str) -> Option<&str> {
        self.scopes
            .get(scope)
            .and_then(|values| values.get(key))
            .map(String::as_str)
    }

    /// Stores `value` under `key` in `scope`, creating the scope if needed
    pub fn set_scope_value(&mut self, scope: &str, key: &str, value: impl Into<String>) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }
}

/// Share flow settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSettings {
    /// Open the published URL in the default browser after a share
    #[serde(default)]
    pub open_shared_code_in_browser: bool,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Staging area settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingSettings {
    /// Root directory for staged files (`~` is expanded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}
