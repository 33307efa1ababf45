//! Property-based tests for snippet naming and construction

use proptest::prelude::*;
use sharecode_core::Snippet;

use crate::fixtures::Editor;

// Strategy for path segments free of separators
fn arb_segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_. -]{0,12}".prop_map(|s| s)
}

// Strategy for a separator of either style
fn arb_separator() -> impl Strategy<Value = char> {
    prop_oneof![Just('/'), Just('\\')]
}

// Strategy for raw paths mixing both separator styles
fn arb_mixed_path() -> impl Strategy<Value = (String, String)> {
    (
        prop::collection::vec((arb_segment(), arb_separator()), 0..6),
        arb_segment(),
    )
        .prop_map(|(parts, last)| {
            let mut path = String::new();
            for (segment, separator) in parts {
                path.push_str(&segment);
                path.push(separator);
            }
            path.push_str(&last);
            (path, last)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The name is exactly what follows the last separator of either kind
    #[test]
    fn name_is_text_after_last_separator((path, last) in arb_mixed_path()) {
        let name = Snippet::file_name_from_path(&path);
        prop_assert_eq!(&name, &last);
        prop_assert!(!name.contains('/') && !name.contains('\\'));
    }

    /// Doubled trailing separators leave an empty name, never a separator
    #[test]
    fn doubled_trailing_separators_yield_empty_name(
        (path, _) in arb_mixed_path(),
        first in arb_separator(),
        second in arb_separator(),
    ) {
        let raw = format!("{path}{first}{second}");
        prop_assert_eq!(Snippet::file_name_from_path(&raw), "");
    }

    /// Names without separators are kept as they are
    #[test]
    fn plain_names_unchanged(name in arb_segment()) {
        prop_assert_eq!(Snippet::file_name_from_path(&name), name);
    }
}

#[test]
fn empty_selection_snapshot_of_windows_path() {
    let editor = Editor {
        path: "C:\\proj\\a.py",
        language: "python",
        text: "print(1)",
        selection: None,
    };
    let snippet = Snippet::from_source(&editor);

    assert_eq!(snippet, Snippet::new("a.py", "print(1)", "python"));
    assert_eq!(snippet.name(), "a.py");
    assert_eq!(snippet.content(), "print(1)");
    assert_eq!(snippet.format_tag(), "python");
}

#[test]
fn selection_snapshot_uses_selected_text() {
    let editor = Editor {
        path: "/home/dev/project/src/lib.rs",
        language: "rust",
        text: "pub fn a() {}\npub fn b() {}",
        selection: Some("pub fn b() {}"),
    };
    let snippet = Snippet::from_source(&editor);

    assert_eq!(snippet.name(), "lib.rs");
    assert_eq!(snippet.content(), "pub fn b() {}");
    assert_eq!(snippet.format_tag(), "rust");
}
