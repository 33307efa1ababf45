//! Property-based tests for the staging area

use std::fs;

use proptest::prelude::*;
use sharecode_core::StagingArea;
use tempfile::TempDir;

fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,16}(\\.[a-z]{1,4})?"
}

fn arb_content() -> impl Strategy<Value = String> {
    ".{0,200}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Saving returns exactly the computed path and the file holds the content
    #[test]
    fn save_file_lands_at_file_path(
        namespace in "[a-z]{1,10}",
        item_id in arb_name(),
        filename in arb_name(),
        content in arb_content(),
    ) {
        let temp = TempDir::new().unwrap();
        let area = StagingArea::new(temp.path().join("tmp"), namespace);

        let saved = area.save_file(&item_id, &filename, &content).unwrap();
        prop_assert_eq!(&saved, &area.file_path(&item_id, &filename));
        prop_assert_eq!(fs::read_to_string(&saved).unwrap(), content);
    }

    /// A second save of the same item and file replaces the first
    #[test]
    fn save_file_twice_overwrites(
        item_id in arb_name(),
        filename in arb_name(),
        first in arb_content(),
        second in arb_content(),
    ) {
        let temp = TempDir::new().unwrap();
        let area = StagingArea::new(temp.path(), "github");

        area.save_file(&item_id, &filename, &first).unwrap();
        let path = area.save_file(&item_id, &filename, &second).unwrap();
        prop_assert_eq!(fs::read_to_string(path).unwrap(), second);
    }

    /// Distinct items of one namespace never share a directory
    #[test]
    fn items_are_separated(a in arb_name(), b in arb_name(), filename in arb_name()) {
        prop_assume!(a != b);
        let temp = TempDir::new().unwrap();
        let area = StagingArea::new(temp.path(), "gitlab");

        let first = area.save_file(&a, &filename, "a").unwrap();
        let second = area.save_file(&b, &filename, "b").unwrap();
        prop_assert_ne!(first.parent(), second.parent());
        prop_assert_eq!(fs::read_to_string(first).unwrap(), "a");
    }
}

#[test]
fn existing_directories_are_reused() {
    let temp = TempDir::new().unwrap();
    let area = StagingArea::new(temp.path(), "pastebin");
    fs::create_dir_all(area.item_dir("abc")).unwrap();
    fs::write(area.file_path("abc", "other.txt"), "kept").unwrap();

    area.save_file("abc", "new.txt", "fresh").unwrap();

    assert_eq!(
        fs::read_to_string(area.file_path("abc", "other.txt")).unwrap(),
        "kept"
    );
    assert_eq!(
        fs::read_to_string(area.file_path("abc", "new.txt")).unwrap(),
        "fresh"
    );
}

#[test]
fn namespaces_share_a_root() {
    let temp = TempDir::new().unwrap();
    let github = StagingArea::new(temp.path(), "github");
    let gitlab = StagingArea::new(temp.path(), "gitlab");

    let a = github.save_file("1", "f.txt", "gh").unwrap();
    let b = gitlab.save_file("1", "f.txt", "gl").unwrap();

    assert_ne!(a, b);
    assert!(a.starts_with(temp.path().join("github")));
    assert!(b.starts_with(temp.path().join("gitlab")));
}
