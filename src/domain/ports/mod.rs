//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod producer;
pub mod run_events;

pub use file_system::FileSystem;
pub use producer::{Producer, ProducerLoader};
pub use run_events::{FileStatus, NoopEventSink, RunEvent, RunEventSink};
