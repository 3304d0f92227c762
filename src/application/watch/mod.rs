//! Watch Use Case
//!
//! Keeps the tree reconciled while it changes. It orchestrates:
//! - File system monitoring (via `notify` crate) into a bounded queue
//! - Fixed, non-sliding batching windows (500ms default)
//! - A per-batch decision: only structural changes or producer edits rerun
//! - Cache invalidation and a full pipeline rerun
//!
//! ## Architecture
//!
//! - `WatchUseCase` - initial run, subscription, shutdown
//! - `WatchCoordinator` - the Idle → Batching → Deciding → Regenerating loop
//! - `BatchWindow` / `Batch` - window timing and the regeneration decision
//! - `WatchEvent` - Events emitted during watch operation
//!
//! ## Usage
//!
//! ```ignore
//! let pipeline = Pipeline::from_config(root, mode, &config);
//! let mut use_case = WatchUseCase::new(pipeline, WatchOptions::from_config(&config));
//! use_case.start(running, &sink, |event| { ... })?;
//! ```

mod batch;
mod event;
mod queue;
mod use_case;


pub use batch::{Batch, BatchWindow, WatchPhase};
pub use event::{ChangeEvent, ChangeKind, WatchEvent, WatchOptions};
pub use queue::{event_queue, subscribe, EventQueue, EventSender, Subscription};
pub use use_case::{WatchCoordinator, WatchStats, WatchUseCase};
