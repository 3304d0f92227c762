//! Producer loading backed by child processes.

mod command;
mod process;

pub use command::LaunchCommand;
pub use process::{ProcessLoader, ProcessProducer, PRODUCERS_ROOT_VAR, PRODUCER_PATH_VAR};
