//! Producer ports
//!
//! A `Producer` maps a snapshot of the tree to the files it wants to exist.
//! A `ProducerLoader` turns a producer's source path into a callable handle;
//! the registry caches what the loader returns.

use std::path::Path;

use crate::domain::entities::ProducedFile;
use crate::domain::value_objects::FileSnapshot;
use crate::error::ProducersResult;

/// A loaded, callable producer
pub trait Producer {
    /// Run against `snapshot`, returning every file this producer owns.
    ///
    /// Failures must be reported as `ProducersError::ProducerExecution`.
    fn produce(&self, snapshot: &FileSnapshot) -> ProducersResult<Vec<ProducedFile>>;
}

impl<F> Producer for F
where
    F: Fn(&FileSnapshot) -> ProducersResult<Vec<ProducedFile>>,
{
    fn produce(&self, snapshot: &FileSnapshot) -> ProducersResult<Vec<ProducedFile>> {
        self(snapshot)
    }
}

/// Resolves a producer source file into a handle
pub trait ProducerLoader {
    /// Load the producer at absolute `path`, reading its current on-disk state.
    ///
    /// Failures must be reported as `ProducersError::ProducerLoad`.
    fn load(&self, path: &Path) -> ProducersResult<Box<dyn Producer>>;
}

impl<F> ProducerLoader for F
where
    F: Fn(&Path) -> ProducersResult<Box<dyn Producer>>,
{
    fn load(&self, path: &Path) -> ProducersResult<Box<dyn Producer>> {
        self(path)
    }
}
