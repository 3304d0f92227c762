//! RunOutcome entity - aggregate status of one reconciliation run

use std::path::PathBuf;

/// What happened to each produced file in a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Files whose content already matched
    pub okay: Vec<PathBuf>,
    /// Files overwritten in fix mode
    pub fixed: Vec<PathBuf>,
    /// Files found divergent in check mode
    pub mismatched: Vec<PathBuf>,
}

impl RunOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no divergence remains on disk
    pub fn is_success(&self) -> bool {
        self.mismatched.is_empty()
    }

    /// Process exit code for a non-watch run
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Total number of reconciled files
    pub fn total(&self) -> usize {
        self.okay.len() + self.fixed.len() + self.mismatched.len()
    }
}
