//! Domain Layer
//!
//! Pure types and interfaces for a producers run.
//!
//! ## Structure
//!
//! - `entities/` - ProducedFile, ProducerOutput, RunOutcome
//! - `value_objects/` - RelativePath, FileSnapshot, ProducerPattern, Mode
//! - `ports/` - FileSystem, Producer, ProducerLoader, RunEventSink
//!
//! Nothing here touches the file system or spawns processes.

pub mod entities;
pub mod ports;
pub mod value_objects;
