//! Domain Entities
//!
//! Values that flow through a run: what producers ask for and what
//! reconciliation did about it.

mod outcome;
mod produced_file;

pub use outcome::RunOutcome;
pub use produced_file::{flatten_outputs, ProducedFile, ProducerOutput};
