//! Watch Use Case implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::pipeline::Pipeline;
use crate::domain::ports::{FileSystem, ProducerLoader, RunEventSink};
use crate::domain::value_objects::display_path;
use crate::error::ProducersResult;

use super::batch::{BatchWindow, WatchPhase};
use super::event::{WatchEvent, WatchOptions};
use super::queue::{event_queue, subscribe, EventQueue};

/// Longest the loop blocks before rechecking the running flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Counters for one watch session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    /// Windows closed
    pub batches: usize,
    /// Reruns started
    pub regenerations: usize,
    /// Reruns that failed
    pub failures: usize,
}

/// Drains the change queue in fixed windows and reruns the pipeline
pub struct WatchCoordinator<'p, L, F> {
    pipeline: &'p mut Pipeline<L, F>,
    options: WatchOptions,
    phase: WatchPhase,
    stats: WatchStats,
}

impl<'p, L: ProducerLoader, F: FileSystem> WatchCoordinator<'p, L, F> {
    pub fn new(pipeline: &'p mut Pipeline<L, F>, options: WatchOptions) -> Self {
        Self {
            pipeline,
            options,
            phase: WatchPhase::Idle,
            stats: WatchStats::default(),
        }
    }

    pub fn phase(&self) -> WatchPhase {
        self.phase
    }

    /// Process events until `running` clears or the queue disconnects.
    ///
    /// A window still open when the queue disconnects is decided
    /// immediately. Regeneration failures are reported and do not stop the
    /// loop.
    pub fn run<E>(
        &mut self,
        queue: &EventQueue,
        running: &AtomicBool,
        sink: &dyn RunEventSink,
        on_event: &E,
    ) -> WatchStats
    where
        E: Fn(WatchEvent),
    {
        let mut window = BatchWindow::new(self.options.window);

        while running.load(Ordering::SeqCst) {
            let timeout = window.deadline().map_or(POLL_INTERVAL, |deadline| {
                deadline
                    .saturating_duration_since(Instant::now())
                    .min(POLL_INTERVAL)
            });

            match queue.recv_timeout(timeout) {
                Ok(event) => {
                    tracing::trace!(path = %event.path.display(), kind = ?event.kind, "change");
                    window.push(event, Instant::now());
                    self.set_phase(window.phase());
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    if !window.is_empty() {
                        self.flush(&mut window, queue, sink, on_event);
                    }
                    break;
                }
            }

            if window.is_due(Instant::now()) {
                self.flush(&mut window, queue, sink, on_event);
            }
        }

        self.stats
    }

    fn set_phase(&mut self, phase: WatchPhase) {
        if self.phase != phase {
            tracing::trace!(from = ?self.phase, to = ?phase, "watch phase");
            self.phase = phase;
        }
    }

    fn flush<E>(
        &mut self,
        window: &mut BatchWindow,
        queue: &EventQueue,
        sink: &dyn RunEventSink,
        on_event: &E,
    ) where
        E: Fn(WatchEvent),
    {
        self.set_phase(WatchPhase::Deciding);
        let batch = window.close(queue.take_overflow());
        self.stats.batches += 1;

        let pattern = self.pipeline.pattern();
        let regenerate = batch.warrants_regeneration(pattern);
        let trigger = match batch.trigger(pattern) {
            Some(event) => display_path(self.pipeline.root(), &event.path),
            None => "dropped events".to_string(),
        };

        tracing::debug!(
            events = batch.len(),
            overflowed = batch.overflowed,
            regenerate,
            "batch closed"
        );
        on_event(WatchEvent::Batch {
            events: batch.len(),
            regenerate,
            overflowed: batch.overflowed,
        });

        if regenerate {
            self.regenerate(trigger, sink, on_event);
        }
        self.set_phase(WatchPhase::Idle);
    }

    fn regenerate<E>(&mut self, trigger: String, sink: &dyn RunEventSink, on_event: &E)
    where
        E: Fn(WatchEvent),
    {
        self.set_phase(WatchPhase::Regenerating);
        self.stats.regenerations += 1;
        tracing::info!(trigger = %trigger, "regenerating");
        on_event(WatchEvent::Regenerating { trigger });

        self.pipeline.invalidate();
        match self.pipeline.run(sink) {
            Ok(outcome) => on_event(WatchEvent::RegenerationComplete {
                okay: outcome.okay.len(),
                fixed: outcome.fixed.len(),
                mismatched: outcome.mismatched.len(),
            }),
            Err(e) => {
                self.stats.failures += 1;
                tracing::error!(error = %e, "regeneration failed");
                on_event(WatchEvent::RegenerationFailed {
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Watch Use Case
///
/// Initial run, then subscribe and keep the tree reconciled until stopped.
/// This is the entry point for `producers --watch`.
pub struct WatchUseCase<L, F> {
    pipeline: Pipeline<L, F>,
    options: WatchOptions,
}

impl<L: ProducerLoader, F: FileSystem> WatchUseCase<L, F> {
    pub fn new(pipeline: Pipeline<L, F>, options: WatchOptions) -> Self {
        Self { pipeline, options }
    }

    /// Start watching (blocking)
    ///
    /// Blocks until the running flag is set to false. A failing initial run
    /// is returned as an error before anything is subscribed.
    pub fn start<E>(
        &mut self,
        running: Arc<AtomicBool>,
        sink: &dyn RunEventSink,
        on_event: E,
    ) -> ProducersResult<WatchStats>
    where
        E: Fn(WatchEvent),
    {
        self.pipeline.run(sink)?;

        let (sender, queue) = event_queue(self.options.queue_capacity);
        let subscription = subscribe(self.pipeline.root(), sender)?;
        on_event(WatchEvent::started(
            self.pipeline.root(),
            self.pipeline.mode(),
            &self.options,
        ));

        let stats = WatchCoordinator::new(&mut self.pipeline, self.options.clone()).run(
            &queue,
            &running,
            sink,
            &on_event,
        );

        drop(subscription);
        on_event(WatchEvent::Shutdown);
        Ok(stats)
    }
}
