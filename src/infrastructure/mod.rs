//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - FileSystem implementations
//! - `producer/` - process-backed ProducerLoader
//! - `scanner` - tree enumeration

pub mod fs;
pub mod producer;
pub mod scanner;

pub use fs::LocalFs;
pub use producer::{LaunchCommand, ProcessLoader, ProcessProducer};
pub use scanner::TreeScanner;
