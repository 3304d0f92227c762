//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod mode;
mod path;
mod producer_pattern;

pub use mode::Mode;
pub use path::{display_path, FileSnapshot, RelativePath};
pub use producer_pattern::{ProducerPattern, DEFAULT_SUFFIX};
