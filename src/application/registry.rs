//! Producer registry
//!
//! Caches loaded producer handles by absolute source path. A cached handle
//! is reused until the cache is invalidated; the next `resolve` after an
//! invalidation reloads from the file's current contents.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::ports::{Producer, ProducerLoader};
use crate::error::ProducersResult;

/// A producer handle plus where and when it was loaded
pub struct LoadedProducer {
    source_path: PathBuf,
    handle: Box<dyn Producer>,
    generation: u64,
}

impl LoadedProducer {
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn handle(&self) -> &dyn Producer {
        self.handle.as_ref()
    }

    /// Registry generation this handle was loaded in
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl std::fmt::Debug for LoadedProducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedProducer")
            .field("source_path", &self.source_path)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Cache of loaded producers
pub struct ProducerRegistry<L> {
    loader: L,
    cache: HashMap<PathBuf, LoadedProducer>,
    generation: u64,
}

impl<L: ProducerLoader> ProducerRegistry<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            cache: HashMap::new(),
            generation: 0,
        }
    }

    /// Return the cached handle for `path`, loading it on first use.
    ///
    /// A load failure leaves the cache untouched.
    pub fn resolve(&mut self, path: &Path) -> ProducersResult<&LoadedProducer> {
        match self.cache.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let handle = self.loader.load(path)?;
                tracing::debug!(producer = %path.display(), generation = self.generation, "cached producer");
                Ok(entry.insert(LoadedProducer {
                    source_path: path.to_path_buf(),
                    handle,
                    generation: self.generation,
                }))
            }
        }
    }

    /// Drop every cached handle.
    pub fn invalidate_all(&mut self) {
        if !self.cache.is_empty() {
            tracing::debug!(dropped = self.cache.len(), "invalidated producer cache");
        }
        self.cache.clear();
        self.generation += 1;
    }

    /// Drop the cached handle for one producer, if any.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.cache.remove(path).is_some()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.cache.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of full invalidations so far
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
