//! Error types for producers
//!
//! Library code returns `ProducersResult`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for producers operations
pub type ProducersResult<T> = Result<T, ProducersError>;

/// Main error type for producers operations
///
/// Every variant except `Config` and `Watch` aborts the run it occurs in.
#[derive(Error, Debug)]
pub enum ProducersError {
    /// A directory could not be listed or an entry could not be stat'd
    #[error("failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A producer could not be resolved or prepared for execution
    #[error("failed to load producer {path}: {reason}")]
    ProducerLoad { path: PathBuf, reason: String },

    /// A producer ran but failed or returned unusable output
    #[error("producer {path} failed: {reason}")]
    ProducerExecution { path: PathBuf, reason: String },

    /// Overwriting a generated file failed in fix mode
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid `producers.toml`
    #[error("invalid config in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The filesystem subscription could not be set up
    #[error("failed to watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProducersError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ProducerLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn execution(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ProducerExecution {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
