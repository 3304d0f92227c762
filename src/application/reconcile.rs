//! Reconciliation
//!
//! Compares each produced file against what is on disk. A missing or
//! unreadable target counts as empty. Fix mode overwrites divergent files in
//! place; check mode only reports them.

use std::path::Path;

use crate::domain::entities::{ProducerOutput, RunOutcome};
use crate::domain::ports::{FileStatus, FileSystem, RunEvent, RunEventSink};
use crate::domain::value_objects::{display_path, Mode};
use crate::error::{ProducersError, ProducersResult};

/// Reconciles produced files against a file system
pub struct ReconciliationEngine<'a, F> {
    fs: F,
    root: &'a Path,
}

impl<'a, F: FileSystem> ReconciliationEngine<'a, F> {
    pub fn new(fs: F, root: &'a Path) -> Self {
        Self { fs, root }
    }

    /// Reconcile every output in order, reporting each file to `sink`.
    ///
    /// A write failure aborts the remaining files; files already fixed stay
    /// written.
    pub fn reconcile(
        &self,
        outputs: &[ProducerOutput],
        mode: Mode,
        sink: &dyn RunEventSink,
    ) -> ProducersResult<RunOutcome> {
        let mut outcome = RunOutcome::new();

        for output in outputs {
            sink.on_event(RunEvent::Produce {
                producer: output.producer.clone(),
                files: output.files.len(),
            });

            for file in &output.files {
                let path = file.path();
                let current = match self.fs.read(path) {
                    Ok(content) => content,
                    Err(e) => {
                        tracing::trace!(path = %path.display(), error = %e, "treating target as empty");
                        String::new()
                    }
                };

                let status = if current == file.content() {
                    outcome.okay.push(path.to_path_buf());
                    FileStatus::Okey
                } else if mode.is_check() {
                    outcome.mismatched.push(path.to_path_buf());
                    FileStatus::Error
                } else {
                    self.fs
                        .write(path, file.content())
                        .map_err(|source| ProducersError::Write {
                            path: path.to_path_buf(),
                            source,
                        })?;
                    outcome.fixed.push(path.to_path_buf());
                    FileStatus::Fixed
                };

                sink.on_event(RunEvent::File {
                    status,
                    path: display_path(self.root, path),
                });
            }
        }

        sink.on_event(RunEvent::RunComplete {
            okay: outcome.okay.len(),
            fixed: outcome.fixed.len(),
            mismatched: outcome.mismatched.len(),
        });

        Ok(outcome)
    }
}
