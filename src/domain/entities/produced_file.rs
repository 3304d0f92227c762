//! ProducedFile entity - one file a producer wants to exist
//!
//! ProducedFiles are the result of running a producer against a snapshot.
//! The content always replaces the target file in full.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::RelativePath;

/// A generated file: absolute target path plus its complete desired content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedFile {
    path: PathBuf,
    content: String,
}

impl ProducedFile {
    /// Create a new ProducedFile
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Build content by joining `lines` with `\n`.
    ///
    /// The sequence is consumed once; no trailing newline is appended, so a
    /// file ending in a newline yields a final empty line.
    pub fn from_lines<I, S>(path: impl Into<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut content = String::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                content.push('\n');
            }
            content.push_str(line.as_ref());
        }
        Self::new(path, content)
    }

    /// Get the target path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the desired content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Files requested by a single producer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerOutput {
    pub producer: RelativePath,
    pub files: Vec<ProducedFile>,
}

impl ProducerOutput {
    pub fn new(producer: RelativePath, files: Vec<ProducedFile>) -> Self {
        Self { producer, files }
    }
}

/// Flatten grouped outputs into the ordered list of produced files.
pub fn flatten_outputs(outputs: Vec<ProducerOutput>) -> Vec<ProducedFile> {
    outputs.into_iter().flat_map(|o| o.files).collect()
}
