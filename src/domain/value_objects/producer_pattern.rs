//! Producer naming pattern
//!
//! A producer is any file whose name ends with the suffix token immediately
//! before its extension: `gen_producer.sh`, `api/types_producer.py`.

use std::path::Path;

/// Default producer suffix token
pub const DEFAULT_SUFFIX: &str = "_producer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerPattern {
    suffix: String,
}

impl Default for ProducerPattern {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIX)
    }
}

impl ProducerPattern {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Check a bare file name (no directory part).
    pub fn matches_name(&self, name: &str) -> bool {
        // Last dot splits stem from extension; a leading dot is not an extension.
        match name.rfind('.') {
            Some(dot) if dot > 0 && dot + 1 < name.len() => name[..dot].ends_with(&self.suffix),
            _ => false,
        }
    }

    /// Check a `/`-separated relative path or a native path.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| self.matches_name(n))
            .unwrap_or(false)
    }
}
