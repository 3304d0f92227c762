//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, ports, value objects)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `ProducerRegistry` - caches loaded producers, invalidated on demand
//! - `ProducerExecutor` - runs every producer against one snapshot
//! - `ReconciliationEngine` - compares and reports or writes
//! - `Pipeline` - scan, execute, reconcile
//! - `WatchUseCase` - keeps the tree reconciled while it changes

pub mod executor;
pub mod pipeline;
pub mod reconcile;
pub mod registry;
pub mod watch;

#[cfg(test)]
pub(crate) mod testing;

pub use executor::ProducerExecutor;
pub use pipeline::Pipeline;
pub use reconcile::ReconciliationEngine;
pub use registry::{LoadedProducer, ProducerRegistry};
pub use watch::{
    ChangeEvent, ChangeKind, WatchCoordinator, WatchEvent, WatchOptions, WatchStats, WatchUseCase,
};
