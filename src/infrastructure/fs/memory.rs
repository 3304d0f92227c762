//! In-memory FileSystem used by unit tests

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::ports::FileSystem;

/// Map-backed file system that counts writes and can refuse some paths
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<HashMap<PathBuf, String>>,
    unreadable: RefCell<HashSet<PathBuf>>,
    unwritable: RefCell<HashSet<PathBuf>>,
    writes: Cell<usize>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.borrow_mut().insert(path.into(), content.to_string());
        self
    }

    /// Reads of `path` fail with `InvalidData`, whether or not it exists.
    pub fn deny_reads_to(&self, path: impl Into<PathBuf>) {
        self.unreadable.borrow_mut().insert(path.into());
    }

    pub fn deny_writes_to(&self, path: impl Into<PathBuf>) {
        self.unwritable.borrow_mut().insert(path.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn set(&self, path: impl Into<PathBuf>, content: &str) {
        self.files.borrow_mut().insert(path.into(), content.to_string());
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> io::Result<String> {
        if self.unreadable.borrow().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            ));
        }
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.unwritable.borrow().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.writes.set(self.writes.get() + 1);
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
