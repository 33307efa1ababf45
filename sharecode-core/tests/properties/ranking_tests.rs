//! Property-based tests for candidate ranking

use std::sync::Arc;

use proptest::prelude::*;
use sharecode_core::{
    rank_candidates, BuiltinCatalog, ConfigKey, EnglishLabels, MemorySettingsStore,
    ServiceCatalog, ServiceConfiguration, ServiceKind,
};
use tempfile::TempDir;

use crate::fixtures::{FakeCatalog, FakeSpec};

const LABELS: [&str; 8] = ["s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7"];

// Strategy for up to eight (anonymous, configured) service flags
fn arb_flags() -> impl Strategy<Value = Vec<(bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>()), 0..=LABELS.len())
}

fn specs_from(flags: &[(bool, bool)]) -> Vec<FakeSpec> {
    flags
        .iter()
        .zip(LABELS)
        .map(|(&(anonymous, configured), label)| FakeSpec::new(label, anonymous, configured))
        .collect()
}

fn index_of(label: &str) -> usize {
    LABELS.iter().position(|l| *l == label).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Configured first, then not configured, each group in enumeration order
    #[test]
    fn ranking_is_a_stable_partition(flags in arb_flags(), with_anonymous in any::<bool>()) {
        let catalog = FakeCatalog::new(specs_from(&flags));
        let ranked = rank_candidates(catalog.services(), with_anonymous);

        let expected: Vec<&str> = [true, false]
            .into_iter()
            .flat_map(|want_configured| {
                flags
                    .iter()
                    .zip(LABELS)
                    .filter(move |(flag, _)| {
                        flag.1 == want_configured && (with_anonymous || !flag.0)
                    })
                    .map(|(_, label)| label)
            })
            .collect();
        let actual: Vec<&str> = ranked.iter().map(|d| d.label.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Without anonymous candidates none survive ranking
    #[test]
    fn no_anonymous_when_excluded(flags in arb_flags()) {
        let catalog = FakeCatalog::new(specs_from(&flags));
        let ranked = rank_candidates(catalog.services(), false);

        prop_assert!(ranked.iter().all(|d| !d.service.is_anonymous()));
        let authenticated = flags.iter().filter(|(anonymous, _)| !anonymous).count();
        prop_assert_eq!(ranked.len(), authenticated);
    }

    /// Within the configured group the relative order never changes
    #[test]
    fn configured_keep_relative_order(flags in arb_flags()) {
        let catalog = FakeCatalog::new(specs_from(&flags));
        let ranked = rank_candidates(catalog.services(), true);

        let configured: Vec<usize> = ranked
            .iter()
            .filter(|d| !d.service.is_not_configured())
            .map(|d| index_of(&d.label))
            .collect();
        prop_assert!(configured.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn unconfigured_gitlab_is_ranked_last() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(MemorySettingsStore::new());
    store.insert("shareCode.pastebin", "authtoken", "dev-key");
    let catalog = BuiltinCatalog::new(store, temp.path().to_path_buf(), Arc::new(EnglishLabels));

    let ranked = rank_candidates(catalog.services(), true);
    let configured: Vec<(ServiceKind, bool)> = ranked
        .iter()
        .take_while(|d| !d.service.is_not_configured())
        .map(|d| (d.kind, d.service.is_anonymous()))
        .collect();
    assert_eq!(
        configured,
        vec![(ServiceKind::Pastebin, true), (ServiceKind::Github, true)]
    );
    let last = ranked.last().unwrap();
    assert_eq!(last.kind, ServiceKind::Gitlab);
    assert!(last.service.is_not_configured());
}

#[test]
fn configuring_a_service_moves_it_up() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(MemorySettingsStore::new());
    let rt = tokio::runtime::Runtime::new().unwrap();

    let gitlab = ServiceConfiguration::new("gitlab", store.clone());
    rt.block_on(gitlab.set(ConfigKey::AuthToken, "glpat-abc"))
        .unwrap();

    let catalog = BuiltinCatalog::new(store, temp.path().to_path_buf(), Arc::new(EnglishLabels));
    let ranked = rank_candidates(catalog.services(), false);
    assert_eq!(ranked[0].kind, ServiceKind::Gitlab);
    assert!(!ranked[0].service.is_not_configured());
}
