//! Produce pipeline
//!
//! One run is Scan → filter producers → Execute → Reconcile:
//!
//! 1. Scan the root into a snapshot
//! 2. Keep paths whose file name matches the producer pattern
//! 3. Run every producer against the snapshot (via the cached registry)
//! 4. Reconcile all produced files in one pass
//!
//! The pipeline owns the registry, so watch mode can invalidate it between
//! runs.

use std::path::{Path, PathBuf};

use crate::application::executor::ProducerExecutor;
use crate::application::reconcile::ReconciliationEngine;
use crate::application::registry::ProducerRegistry;
use crate::config::Config;
use crate::domain::entities::RunOutcome;
use crate::domain::ports::{FileSystem, ProducerLoader, RunEventSink};
use crate::domain::value_objects::{FileSnapshot, Mode, ProducerPattern, RelativePath};
use crate::error::ProducersResult;
use crate::infrastructure::{LocalFs, ProcessLoader, TreeScanner};

/// Scan, execute, reconcile for one root and mode
pub struct Pipeline<L, F> {
    root: PathBuf,
    mode: Mode,
    pattern: ProducerPattern,
    scanner: TreeScanner,
    registry: ProducerRegistry<L>,
    fs: F,
}

impl Pipeline<ProcessLoader, LocalFs> {
    /// Process-backed pipeline configured from `producers.toml` settings.
    pub fn from_config(root: impl Into<PathBuf>, mode: Mode, config: &Config) -> Self {
        let root = root.into();
        let loader = ProcessLoader::new(&root).with_interpreters(config.interpreters.clone());
        Pipeline::new(root, mode, loader, LocalFs::new())
            .with_pattern(config.pattern())
            .with_scanner(TreeScanner::new().with_sort(config.producers.sort))
    }
}

impl<L: ProducerLoader, F: FileSystem> Pipeline<L, F> {
    pub fn new(root: impl Into<PathBuf>, mode: Mode, loader: L, fs: F) -> Self {
        Self {
            root: root.into(),
            mode,
            pattern: ProducerPattern::default(),
            scanner: TreeScanner::new(),
            registry: ProducerRegistry::new(loader),
            fs,
        }
    }

    pub fn with_pattern(mut self, pattern: ProducerPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_scanner(mut self, scanner: TreeScanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pattern(&self) -> &ProducerPattern {
        &self.pattern
    }

    pub fn registry(&self) -> &ProducerRegistry<L> {
        &self.registry
    }

    /// Force every producer to be reloaded on the next run.
    pub fn invalidate(&mut self) {
        self.registry.invalidate_all();
    }

    /// Execute one full run.
    ///
    /// Scan, load, and execution errors abort before anything is written.
    pub fn run(&mut self, sink: &dyn RunEventSink) -> ProducersResult<RunOutcome> {
        let files = self.scanner.scan(&self.root)?;
        let producers: Vec<RelativePath> = files
            .iter()
            .filter(|path| self.pattern.matches_name(path.file_name()))
            .cloned()
            .collect();
        tracing::debug!(files = files.len(), producers = producers.len(), "discovered producers");

        let snapshot = FileSnapshot::new(files);
        let outputs = ProducerExecutor::new(&mut self.registry, &self.root)
            .with_sink(sink)
            .run(&snapshot, &producers)?;

        ReconciliationEngine::new(&self.fs, &self.root).reconcile(&outputs, self.mode, sink)
    }
}
