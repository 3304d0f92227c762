//! Mode value object - what reconciliation does with a divergent file
//!
//! - `Check` mode: report only, never touch the filesystem
//! - `Fix` mode: overwrite the file with the producer's content

use serde::Serialize;

/// Reconciliation mode for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Report divergence without writing
    Check,
    /// Overwrite divergent files
    #[default]
    Fix,
}

impl Mode {
    /// Build from the CLI `--check` flag
    pub fn from_check_flag(check: bool) -> Self {
        if check {
            Mode::Check
        } else {
            Mode::Fix
        }
    }

    /// Returns true if divergent files are only reported
    pub fn is_check(&self) -> bool {
        matches!(self, Mode::Check)
    }

    /// Returns true if divergent files are overwritten
    pub fn is_fix(&self) -> bool {
        matches!(self, Mode::Fix)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Check => write!(f, "check"),
            Mode::Fix => write!(f, "fix"),
        }
    }
}
