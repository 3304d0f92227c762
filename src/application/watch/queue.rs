//! Bounded notification queue
//!
//! The notify backend thread pushes; the coordinator loop drains. A full
//! queue drops the event and raises an overflow flag that the next batch
//! picks up.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::sync::Arc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::MAX_QUEUE_CAPACITY;
use crate::error::{ProducersError, ProducersResult};

use super::event::ChangeEvent;

/// Create a queue holding at most `capacity` pending events, capped at
/// `MAX_QUEUE_CAPACITY`.
pub fn event_queue(capacity: usize) -> (EventSender, EventQueue) {
    let (tx, rx) = sync_channel(capacity.min(MAX_QUEUE_CAPACITY));
    let overflowed = Arc::new(AtomicBool::new(false));
    (
        EventSender {
            tx,
            overflowed: Arc::clone(&overflowed),
        },
        EventQueue { rx, overflowed },
    )
}

/// Producer side of the queue
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: SyncSender<ChangeEvent>,
    overflowed: Arc<AtomicBool>,
}

impl EventSender {
    /// Enqueue without blocking. Returns false if the event was dropped.
    pub fn push(&self, event: ChangeEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                if !self.overflowed.swap(true, Ordering::SeqCst) {
                    tracing::warn!(path = %event.path.display(), "watch queue full, dropping events");
                }
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Consumer side of the queue
#[derive(Debug)]
pub struct EventQueue {
    rx: Receiver<ChangeEvent>,
    overflowed: Arc<AtomicBool>,
}

impl EventQueue {
    pub fn recv_timeout(&self, timeout: Duration) -> Result<ChangeEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Read and clear the overflow flag.
    pub fn take_overflow(&self) -> bool {
        self.overflowed.swap(false, Ordering::SeqCst)
    }
}

/// Live filesystem subscription; dropping it stops notifications.
pub struct Subscription {
    _watcher: RecommendedWatcher,
}

/// Subscribe recursively to changes under `root`, feeding `sender`.
pub fn subscribe(root: &Path, sender: EventSender) -> ProducersResult<Subscription> {
    let watch_error = |e: notify::Error| ProducersError::Watch {
        path: root.to_path_buf(),
        message: e.to_string(),
    };

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                for change in ChangeEvent::from_notify(&event) {
                    sender.push(change);
                }
            }
            Err(e) => tracing::warn!(error = %e, "watch backend error"),
        },
        notify::Config::default(),
    )
    .map_err(watch_error)?;

    watcher
        .watch(root, RecursiveMode::Recursive)
        .map_err(watch_error)?;

    tracing::debug!(root = %root.display(), "subscribed to changes");
    Ok(Subscription { _watcher: watcher })
}
