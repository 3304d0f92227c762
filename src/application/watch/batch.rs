//! Fixed-window batching and the regeneration decision

use std::time::{Duration, Instant};

use crate::domain::value_objects::ProducerPattern;

use super::event::ChangeEvent;

/// Where the coordinator is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchPhase {
    /// Subscribed, nothing pending
    Idle,
    /// A window is open and collecting events
    Batching,
    /// The window closed; deciding whether to rerun
    Deciding,
    /// Rerunning the pipeline
    Regenerating,
}

/// Collects events for one window that opens on the first event.
///
/// Later events join the open window without extending it.
#[derive(Debug)]
pub struct BatchWindow {
    length: Duration,
    opened_at: Option<Instant>,
    events: Vec<ChangeEvent>,
}

impl BatchWindow {
    pub fn new(length: Duration) -> Self {
        Self {
            length,
            opened_at: None,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: ChangeEvent, now: Instant) {
        if self.opened_at.is_none() {
            self.opened_at = Some(now);
        }
        self.events.push(event);
    }

    pub fn phase(&self) -> WatchPhase {
        if self.opened_at.is_some() {
            WatchPhase::Batching
        } else {
            WatchPhase::Idle
        }
    }

    /// When the open window closes
    pub fn deadline(&self) -> Option<Instant> {
        self.opened_at.map(|opened| opened + self.length)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline().is_some_and(|deadline| now >= deadline)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Close the window, returning its contents.
    pub fn close(&mut self, overflowed: bool) -> Batch {
        self.opened_at = None;
        Batch {
            events: std::mem::take(&mut self.events),
            overflowed,
        }
    }
}

/// Events from one closed window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub events: Vec<ChangeEvent>,
    /// Notifications were dropped while this window was open
    pub overflowed: bool,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// First event that forces a rerun, if any
    pub fn trigger(&self, pattern: &ProducerPattern) -> Option<&ChangeEvent> {
        self.events
            .iter()
            .find(|event| event.kind.is_structural() || pattern.matches(&event.path))
    }

    /// True when the batch holds a structural change, touches a producer,
    /// or lost events to overflow.
    pub fn warrants_regeneration(&self, pattern: &ProducerPattern) -> bool {
        self.overflowed || self.trigger(pattern).is_some()
    }
}
