//! FileSystem port - abstraction over the file I/O reconciliation performs
//!
//! Reconciliation only ever reads a target in full and overwrites it in full,
//! so the port is exactly that wide.

use std::io;
use std::path::Path;

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - `MemoryFs` (tests) - in-memory map that counts writes
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Replace the file's content, creating the file if needed.
    ///
    /// Parent directories are not created.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read(&self, path: &Path) -> io::Result<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        (**self).write(path, content)
    }
}
