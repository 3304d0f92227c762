//! Tree scanner
//!
//! Depth-first enumeration of every non-directory file under a root.
//! Symbolic links are followed (metadata, not symlink_metadata); there is no
//! cycle detection, a looping link surfaces as a scan error from the OS.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::RelativePath;
use crate::error::{ProducersError, ProducersResult};

/// Recursively lists files under a root
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeScanner {
    sort: bool,
}

impl TreeScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort each directory's entries by name before visiting them.
    ///
    /// Off by default: listing order is whatever the filesystem returns.
    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// List every file under `root` as a root-relative path.
    ///
    /// Aborts on the first directory that cannot be listed or entry that
    /// cannot be stat'd; no partial result is returned.
    pub fn scan(&self, root: &Path) -> ProducersResult<Vec<RelativePath>> {
        let mut files = Vec::new();
        self.scan_recursive(root, root, &mut files)?;
        tracing::debug!(root = %root.display(), files = files.len(), "scanned tree");
        Ok(files)
    }

    fn scan_recursive(
        &self,
        root: &Path,
        current: &Path,
        files: &mut Vec<RelativePath>,
    ) -> ProducersResult<()> {
        let mut entries = list_dir(current)?;
        if self.sort {
            entries.sort();
        }

        for path in entries {
            let metadata = fs::metadata(&path).map_err(|source| ProducersError::Scan {
                path: path.clone(),
                source,
            })?;

            if metadata.is_dir() {
                self.scan_recursive(root, &path, files)?;
            } else if let Some(relative) = RelativePath::from_root(root, &path) {
                files.push(relative);
            }
        }

        Ok(())
    }
}

fn list_dir(dir: &Path) -> ProducersResult<Vec<PathBuf>> {
    let scan_error = |source| ProducersError::Scan {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        paths.push(entry.map_err(scan_error)?.path());
    }
    Ok(paths)
}
