//! Property-based tests for the per-service configuration cache

use std::sync::Arc;

use proptest::prelude::*;
use sharecode_core::config::SCOPE_PREFIX;
use sharecode_core::{
    ConfigError, ConfigKey, ConfigManager, MemorySettingsStore, ServiceConfiguration,
    SettingsStore, TomlSettingsStore,
};
use tempfile::TempDir;

fn arb_key() -> impl Strategy<Value = ConfigKey> {
    prop_oneof![
        Just(ConfigKey::Username),
        Just(ConfigKey::AuthToken),
        Just(ConfigKey::BaseUrl),
    ]
}

fn arb_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9:/._-]{0,40}"
}

fn arb_service() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("pastebin".to_string()),
        Just("github".to_string()),
        Just("gitlab".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A read right after a write returns the written value, persisted or not
    #[test]
    fn get_after_set_before_persist(
        service in arb_service(),
        key in arb_key(),
        value in arb_value(),
    ) {
        let store = Arc::new(MemorySettingsStore::new());
        let config = ServiceConfiguration::new(&service, store.clone());
        let scope = format!("{SCOPE_PREFIX}.{service}");

        let pending = config.set(key, value.clone());
        prop_assert_eq!(config.get(key), Some(value.clone()));
        prop_assert_eq!(store.get(&scope, key.as_str()), None);

        tokio::runtime::Runtime::new().unwrap().block_on(pending).unwrap();
        prop_assert_eq!(store.get(&scope, key.as_str()), Some(value));
    }

    /// The last of several writes wins
    #[test]
    fn last_write_wins(
        key in arb_key(),
        values in prop::collection::vec(arb_value(), 1..6),
    ) {
        let store = Arc::new(MemorySettingsStore::new());
        let config = ServiceConfiguration::new("github", store.clone());
        let rt = tokio::runtime::Runtime::new().unwrap();

        for value in &values {
            rt.block_on(config.set(key, value.clone())).unwrap();
        }

        let last = values.last().cloned();
        prop_assert_eq!(config.get(key), last.clone());
        prop_assert_eq!(store.get("shareCode.github", key.as_str()), last);
    }

    /// Names outside the fixed key set always fail
    #[test]
    fn unknown_key_names_fail(name in "[a-z]{1,12}") {
        prop_assume!(!["username", "authtoken", "baseurl"].contains(&name.as_str()));
        let store = Arc::new(MemorySettingsStore::new());
        let config = ServiceConfiguration::new("gitlab", store.clone());

        let is_unknown = matches!(
            config.get_named(&name),
            Err(ConfigError::UnknownKey(ref k)) if *k == name
        );
        prop_assert!(is_unknown);
        prop_assert!(config.set_named(&name, "value").is_err());
        prop_assert_eq!(store.get("shareCode.gitlab", &name), None);
    }

    /// Writes to one service never leak into another
    #[test]
    fn scopes_are_isolated(key in arb_key(), value in arb_value()) {
        let store = Arc::new(MemorySettingsStore::new());
        let github = ServiceConfiguration::new("github", store.clone());
        let gitlab = ServiceConfiguration::new("gitlab", store);

        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(github.set(key, value.clone()))
            .unwrap();

        prop_assert_eq!(github.get(key), Some(value));
        prop_assert_eq!(gitlab.get(key), None);
    }
}

#[test]
fn cached_value_ignores_external_edits() {
    let store = Arc::new(MemorySettingsStore::new());
    store.insert("shareCode.pastebin", "username", "first");
    let config = ServiceConfiguration::new("pastebin", store.clone());

    assert_eq!(config.get(ConfigKey::Username).as_deref(), Some("first"));
    store.insert("shareCode.pastebin", "username", "second");
    assert_eq!(config.get(ConfigKey::Username).as_deref(), Some("first"));
}

#[test]
fn persisted_value_survives_reload() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(temp.path().join("sharecode"));
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = Arc::new(TomlSettingsStore::open(manager.clone()).unwrap());
    let config = ServiceConfiguration::new("github", store);
    rt.block_on(config.set_named("username", "octocat").unwrap())
        .unwrap();

    let reloaded = Arc::new(TomlSettingsStore::open(manager).unwrap());
    let config = ServiceConfiguration::new("github", reloaded);
    assert_eq!(config.get(ConfigKey::Username).as_deref(), Some("octocat"));
}
