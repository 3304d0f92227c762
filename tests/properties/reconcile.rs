//! Property tests for reconciliation against a real directory.

use std::fs;

use proptest::prelude::*;

use producers::application::ReconciliationEngine;
use producers::domain::entities::{ProducedFile, ProducerOutput};
use producers::domain::ports::NoopEventSink;
use producers::domain::value_objects::{Mode, RelativePath};
use producers::infrastructure::LocalFs;

fn content() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z \\n]{0,32}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after a fix run, a check run finds nothing and a second fix
    /// run changes nothing.
    #[test]
    fn property_fix_then_check_is_clean(
        files in proptest::collection::vec((content(), proptest::option::of(content())), 0..8),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let produced: Vec<ProducedFile> = files
            .iter()
            .enumerate()
            .map(|(i, (desired, existing))| {
                let path = dir.path().join(format!("file{i}.txt"));
                if let Some(existing) = existing {
                    fs::write(&path, existing).unwrap();
                }
                ProducedFile::new(path, desired.clone())
            })
            .collect();
        let outputs = vec![ProducerOutput::new(
            RelativePath::from_components(std::path::Path::new("gen_producer.sh")).unwrap(),
            produced.clone(),
        )];
        let engine = ReconciliationEngine::new(LocalFs::new(), dir.path());

        let fixed = engine.reconcile(&outputs, Mode::Fix, &NoopEventSink).unwrap();
        prop_assert_eq!(fixed.total(), files.len());
        prop_assert!(fixed.mismatched.is_empty());

        let checked = engine.reconcile(&outputs, Mode::Check, &NoopEventSink).unwrap();
        prop_assert_eq!(checked.exit_code(), 0);
        prop_assert_eq!(checked.okay.len(), files.len());

        let again = engine.reconcile(&outputs, Mode::Fix, &NoopEventSink).unwrap();
        prop_assert!(again.fixed.is_empty());

        for file in &produced {
            let on_disk = fs::read_to_string(file.path()).unwrap_or_default();
            prop_assert_eq!(on_disk.as_str(), file.content());
        }
    }
}
