//! Producer executor
//!
//! Runs every discovered producer against one shared snapshot, in discovery
//! order. The first failure aborts the run; nothing is reconciled, but the
//! producers that already finished are still reported.

use std::path::Path;

use crate::application::registry::ProducerRegistry;
use crate::domain::entities::ProducerOutput;
use crate::domain::ports::{ProducerLoader, RunEvent, RunEventSink};
use crate::domain::value_objects::{FileSnapshot, RelativePath};
use crate::error::ProducersResult;

/// Runs producers through a registry
pub struct ProducerExecutor<'a, L> {
    registry: &'a mut ProducerRegistry<L>,
    root: &'a Path,
    sink: Option<&'a dyn RunEventSink>,
}

impl<'a, L: ProducerLoader> ProducerExecutor<'a, L> {
    pub fn new(registry: &'a mut ProducerRegistry<L>, root: &'a Path) -> Self {
        Self {
            registry,
            root,
            sink: None,
        }
    }

    /// Report finished producers to `sink` when a later one fails.
    pub fn with_sink(mut self, sink: &'a dyn RunEventSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Resolve and invoke each producer in `producers`, grouping outputs by producer.
    pub fn run(
        &mut self,
        snapshot: &FileSnapshot,
        producers: &[RelativePath],
    ) -> ProducersResult<Vec<ProducerOutput>> {
        let mut outputs = Vec::with_capacity(producers.len());

        for producer in producers {
            let source = producer.to_absolute(self.root);
            let result = self
                .registry
                .resolve(&source)
                .and_then(|loaded| loaded.handle().produce(snapshot));

            match result {
                Ok(files) => {
                    tracing::debug!(producer = %producer, files = files.len(), "producer finished");
                    outputs.push(ProducerOutput::new(producer.clone(), files));
                }
                Err(e) => {
                    self.report_finished(&outputs);
                    return Err(e);
                }
            }
        }

        Ok(outputs)
    }

    fn report_finished(&self, outputs: &[ProducerOutput]) {
        let Some(sink) = self.sink else { return };
        for output in outputs {
            sink.on_event(RunEvent::Produce {
                producer: output.producer.clone(),
                files: output.files.len(),
            });
        }
    }
}
