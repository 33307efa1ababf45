//! Per-service configuration cache
//!
//! Each service owns one `ServiceConfiguration` scoped to its own name. Reads
//! go through an in-memory cache; writes update the cache immediately and
//! persist through the `SettingsStore`.
//!
//! The cache is never invalidated. Edits made to the backing store by anyone
//! else are not observed until a new `ServiceConfiguration` is built.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt};

use crate::error::{ConfigError, ConfigResult};

use super::store::SettingsStore;

/// Prefix shared by every service scope in the settings store
pub const SCOPE_PREFIX: &str = "shareCode";

/// The fixed set of keys a service scope may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Account name (or account key, depending on the service)
    Username,
    /// API token
    AuthToken,
    /// Base URL of a self-hosted instance
    BaseUrl,
}

impl ConfigKey {
    /// All keys, in display order
    pub const ALL: [Self; 3] = [Self::Username, Self::AuthToken, Self::BaseUrl];

    /// The key as stored in the settings store
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::AuthToken => "authtoken",
            Self::BaseUrl => "baseurl",
        }
    }

    const fn is_secret(self) -> bool {
        matches!(self, Self::AuthToken)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(Self::Username),
            "authtoken" => Ok(Self::AuthToken),
            "baseurl" => Ok(Self::BaseUrl),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }
}

/// Cached view of one service's configuration scope
pub struct ServiceConfiguration {
    scope: String,
    store: Arc<dyn SettingsStore>,
    cache: Mutex<HashMap<ConfigKey, Option<String>>>,
}

impl ServiceConfiguration {
    /// Creates a cache for `shareCode.<service_scope>` over `store`
    #[must_use]
    pub fn new(service_scope: &str, store: Arc<dyn SettingsStore>) -> Self {
        Self {
            scope: format!("{SCOPE_PREFIX}.{service_scope}"),
            store,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the dotted scope name (e.g. `shareCode.github`)
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<ConfigKey, Option<String>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads `key`, consulting the store only on the first read
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        let value = self
            .cache()
            .entry(key)
            .or_insert_with(|| self.store.get(&self.scope, key.as_str()))
            .clone();

        let shown = match (&value, key.is_secret()) {
            (None, _) => "<unset>",
            (Some(_), true) => "<redacted>",
            (Some(v), false) => v.as_str(),
        };
        tracing::debug!(scope = %self.scope, key = %key, value = shown, "Read setting");

        value
    }

    /// Writes `key`, updating the cache before the store is touched
    ///
    /// The returned future persists the value and resolves once the store
    /// has done so. Reads issued before it resolves already see `value`.
    ///
    /// The future is lazy: nothing is written until it is polled. Dropping it
    /// leaves `value` in this cache only, and the store keeps its old value.
    #[must_use = "the value is only persisted when the returned future is awaited"]
    pub fn set(&self, key: ConfigKey, value: impl Into<String>) -> BoxFuture<'static, ConfigResult<()>> {
        let value = value.into();
        self.cache().insert(key, Some(value.clone()));

        let store = Arc::clone(&self.store);
        let scope = self.scope.clone();
        async move { store.update(&scope, key.as_str(), &value).await }.boxed()
    }

    /// Reads a key given by name
    ///
    /// # Errors
    /// Returns `ConfigError::UnknownKey` for names outside the fixed key set
    pub fn get_named(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self.get(key.parse()?))
    }

    /// Writes a key given by name
    ///
    /// # Errors
    /// Returns `ConfigError::UnknownKey` for names outside the fixed key set;
    /// nothing is cached or persisted in that case.
    pub fn set_named(
        &self,
        key: &str,
        value: impl Into<String>,
    ) -> ConfigResult<BoxFuture<'static, ConfigResult<()>>> {
        Ok(self.set(key.parse()?, value))
    }
}

impl fmt::Debug for ServiceConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfiguration")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
