//! Property tests for tree scanning and producer discovery.

use std::collections::BTreeSet;
use std::fs;

use proptest::prelude::*;

use producers::domain::value_objects::ProducerPattern;
use producers::infrastructure::TreeScanner;

/// Directory names never contain a dot; file names always contain either a
/// dot or an underscore, so the two can never collide.
fn dir_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,4}").unwrap()
}

fn file_name() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::string::string_regex("[a-z]{1,6}_producer\\.(sh|py|ts)").unwrap(),
        proptest::string::string_regex("[a-z]{1,6}\\.(txt|rs)").unwrap(),
        proptest::string::string_regex("[a-z]{1,6}_producer").unwrap(),
        proptest::string::string_regex("[a-z]{1,6}_producers\\.sh").unwrap(),
        proptest::string::string_regex("\\.[a-z]{1,6}_producer").unwrap(),
    ]
}

fn relative_path() -> impl Strategy<Value = String> {
    (proptest::collection::vec(dir_name(), 0..=3), file_name()).prop_map(|(dirs, file)| {
        let mut parts = dirs;
        parts.push(file);
        parts.join("/")
    })
}

fn is_producer_name(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && !ext.is_empty() && stem.ends_with("_producer"),
        None => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a scan lists exactly the files in the tree, and filtering by
    /// the default pattern keeps exactly the `*_producer.<ext>` ones.
    #[test]
    fn property_discovery_matches_tree(
        paths in proptest::collection::btree_set(relative_path(), 0..24),
        sort in any::<bool>(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        for path in &paths {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(&full, "").unwrap();
        }

        let scanned = TreeScanner::new().with_sort(sort).scan(dir.path()).unwrap();
        let listed: BTreeSet<String> = scanned.iter().map(|p| p.to_string()).collect();

        prop_assert_eq!(scanned.len(), listed.len(), "scan returned duplicates");
        prop_assert_eq!(&listed, &paths);

        let pattern = ProducerPattern::default();
        let discovered: BTreeSet<&str> = scanned
            .iter()
            .filter(|p| pattern.matches_name(p.file_name()))
            .map(|p| p.as_str())
            .collect();
        let expected: BTreeSet<&str> = paths
            .iter()
            .map(String::as_str)
            .filter(|p| is_producer_name(p.rsplit('/').next().unwrap_or(p)))
            .collect();
        prop_assert_eq!(discovered, expected);
    }

    /// PROPERTY: sorted scans are depth-first in name order and reproducible.
    #[test]
    fn property_sorted_scan_is_stable(
        paths in proptest::collection::btree_set(relative_path(), 1..16),
    ) {
        let dir = tempfile::tempdir().unwrap();
        for path in &paths {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(&full, "").unwrap();
        }

        let scanner = TreeScanner::new().with_sort(true);
        let first = scanner.scan(dir.path()).unwrap();
        let second = scanner.scan(dir.path()).unwrap();
        prop_assert_eq!(first, second);
    }
}
