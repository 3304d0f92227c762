pub mod report;
pub mod watch;
