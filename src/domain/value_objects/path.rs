//! Relative Path Value Object
//!
//! A path relative to the scanned root:
//! - Always `/`-separated, regardless of platform
//! - Never absolute, never empty
//! - Only minted by the tree scanner (or tests)

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// A root-relative, `/`-separated file path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RelativePath(String);

impl RelativePath {
    /// Build from a path already known to live under `root`.
    ///
    /// Returns `None` when `path` is not under `root` or is the root itself.
    pub fn from_root(root: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?;
        Self::from_components(relative)
    }

    /// Normalize a relative path, joining normal components with `/`.
    pub fn from_components(path: &Path) -> Option<Self> {
        let mut parts = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return None,
            }
        }

        if parts.is_empty() {
            return None;
        }

        Some(Self(parts.join("/")))
    }

    /// Create without normalization
    #[cfg(test)]
    pub(crate) fn new_unchecked(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final `/`-separated segment
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Resolve against a root directory
    pub fn to_absolute(&self, root: &Path) -> PathBuf {
        self.0.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The ordered list of paths from one scan, shared by every producer of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSnapshot {
    paths: Vec<RelativePath>,
}

impl FileSnapshot {
    pub fn new(paths: Vec<RelativePath>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[RelativePath] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelativePath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl From<Vec<RelativePath>> for FileSnapshot {
    fn from(paths: Vec<RelativePath>) -> Self {
        Self::new(paths)
    }
}

/// Render `path` relative to `root` for reporting, falling back to the full path.
pub fn display_path(root: &Path, path: &Path) -> String {
    RelativePath::from_root(root, path)
        .map(|p| p.to_string())
        .unwrap_or_else(|| path.display().to_string())
}
