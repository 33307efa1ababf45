//! Persistent key-value settings stores
//!
//! A `SettingsStore` holds scoped string values (`shareCode.<service>` scopes)
//! plus the share flow's browser flag. `ServiceConfiguration` caches reads on
//! top of it; the store itself never notifies anyone of changes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{ConfigError, ConfigResult};

use super::manager::ConfigManager;
use super::settings::AppSettings;

/// Abstraction over the persistent settings store
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Reads `key` from `scope`, `None` when unset
    fn get(&self, scope: &str, key: &str) -> Option<String>;

    /// Writes `value` under `key` in `scope` and persists it
    ///
    /// # Errors
    /// Returns `ConfigError` if the value cannot be persisted
    async fn update(&self, scope: &str, key: &str, value: &str) -> ConfigResult<()>;

    /// Whether published URLs should be opened in the default browser
    fn open_shared_code_in_browser(&self) -> bool;
}

fn lock(settings: &Mutex<AppSettings>) -> MutexGuard<'_, AppSettings> {
    settings.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Settings store backed by `settings.toml` in the configuration directory
///
/// The file is read once at construction; every update rewrites it.
#[derive(Debug)]
pub struct TomlSettingsStore {
    manager: ConfigManager,
    settings: Mutex<AppSettings>,
}

impl TomlSettingsStore {
    /// Loads the settings file managed by `manager`
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be parsed.
    pub fn open(manager: ConfigManager) -> ConfigResult<Self> {
        let settings = manager.load_settings()?;
        Ok(Self {
            manager,
            settings: Mutex::new(settings),
        })
    }

    /// Returns a copy of the currently loaded settings
    #[must_use]
    pub fn settings(&self) -> AppSettings {
        lock(&self.settings).clone()
    }
}

#[async_trait]
impl SettingsStore for TomlSettingsStore {
    fn get(&self, scope: &str, key: &str) -> Option<String> {
        lock(&self.settings)
            .scope_value(scope, key)
            .map(str::to_string)
    }

    async fn update(&self, scope: &str, key: &str, value: &str) -> ConfigResult<()> {
        let mut updated = lock(&self.settings).clone();
        updated.set_scope_value(scope, key, value);
        let content = ConfigManager::to_toml(&updated)?;

        self.manager.ensure_config_dir()?;
        let path = self.manager.settings_path();
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| ConfigError::Persist {
                scope: scope.to_string(),
                key: key.to_string(),
                reason: format!("{}: {e}", path.display()),
            })?;

        // Only a persisted value becomes visible to readers
        lock(&self.settings).set_scope_value(scope, key, value);
        tracing::debug!(scope, key, path = %path.display(), "Persisted setting");
        Ok(())
    }

    fn open_shared_code_in_browser(&self) -> bool {
        lock(&self.settings).share.open_shared_code_in_browser
    }
}

/// In-process settings store
///
/// Nothing is written to disk. Useful for tests and for hosts that keep
/// their own settings.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<AppSettings>,
}

impl MemorySettingsStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `settings`
    #[must_use]
    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }

    /// Sets a scope value directly, bypassing any cache built on top
    pub fn insert(&self, scope: &str, key: &str, value: &str) {
        lock(&self.settings).set_scope_value(scope, key, value);
    }

    /// Sets the browser flag
    pub fn set_open_shared_code_in_browser(&self, enabled: bool) {
        lock(&self.settings).share.open_shared_code_in_browser = enabled;
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    fn get(&self, scope: &str, key: &str) -> Option<String> {
        lock(&self.settings)
            .scope_value(scope, key)
            .map(str::to_string)
    }

    async fn update(&self, scope: &str, key: &str, value: &str) -> ConfigResult<()> {
        lock(&self.settings).set_scope_value(scope, key, value);
        Ok(())
    }

    fn open_shared_code_in_browser(&self) -> bool {
        lock(&self.settings).share.open_shared_code_in_browser
    }
}
