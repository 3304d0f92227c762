//! Run Event Port
//!
//! Observable interface for a pipeline run. Console and JSON reporters
//! consume these; the pipeline itself never prints.

use serde::Serialize;

use crate::domain::value_objects::RelativePath;

/// Reconciliation result for a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// On-disk content already matches
    Okey,
    /// Divergent file overwritten (fix mode)
    Fixed,
    /// Divergent file left untouched (check mode)
    Error,
}

impl FileStatus {
    /// Report tag, e.g. `[OKEY]`
    pub fn tag(&self) -> &'static str {
        match self {
            FileStatus::Okey => "[OKEY]",
            FileStatus::Fixed => "[FIXED]",
            FileStatus::Error => "[ERROR]",
        }
    }
}

/// Event emitted during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// A producer ran. Emitted before its files are reconciled, or, when a
    /// later producer fails, for every producer that had finished
    Produce {
        producer: RelativePath,
        files: usize,
    },
    /// One produced file was reconciled; `path` is root-relative when possible
    File { status: FileStatus, path: String },
    /// Run finished
    RunComplete {
        okay: usize,
        fixed: usize,
        mismatched: usize,
    },
}

/// Trait for receiving run events
///
/// Implementations:
/// - `ConsoleSink`: tagged report lines
/// - `JsonSink`: NDJSON event stream
/// - `NoopEventSink`: silent operation
pub trait RunEventSink {
    fn on_event(&self, event: RunEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn on_event(&self, _event: RunEvent) {}
}
