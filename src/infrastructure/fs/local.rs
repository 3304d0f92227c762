//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io;
use std::path::Path;

use crate::domain::ports::FileSystem;

/// Local file system implementation
///
/// Writes go straight to the target (no temp file + rename), so a fix shows
/// up to watchers as a content modification rather than a create/rename.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }
}
