//! Producers - directory-scoped code generation
//!
//! A producer is any file named `*_producer.<ext>` under a root directory.
//! Each run scans the whole tree, hands the listing to every producer, and
//! reconciles the files they return against disk: fixing divergent files,
//! or only reporting them in check mode. Watch mode keeps this going as the
//! tree changes.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::{Pipeline, ProducerRegistry, WatchEvent, WatchOptions, WatchUseCase};
pub use config::Config;
pub use domain::entities::{ProducedFile, RunOutcome};
pub use domain::value_objects::{Mode, RelativePath};
pub use error::{ProducersError, ProducersResult};
