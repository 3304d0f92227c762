//! Process-backed producers
//!
//! Protocol:
//! - working directory: the producer's own directory
//! - stdin: JSON array of the snapshot's root-relative paths
//! - env: `PRODUCERS_ROOT`, `PRODUCER_PATH` (both absolute)
//! - stdout: JSON array of `{"path", "content"}` or `{"path", "lines"}`
//!
//! Relative output paths resolve against the producer's directory.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::command::LaunchCommand;
use crate::domain::entities::ProducedFile;
use crate::domain::ports::{Producer, ProducerLoader};
use crate::domain::value_objects::FileSnapshot;
use crate::error::{ProducersError, ProducersResult};

/// Environment variable holding the absolute scan root
pub const PRODUCERS_ROOT_VAR: &str = "PRODUCERS_ROOT";

/// Environment variable holding the producer's absolute path
pub const PRODUCER_PATH_VAR: &str = "PRODUCER_PATH";

/// Loads producers by resolving how to launch them
#[derive(Debug, Clone)]
pub struct ProcessLoader {
    root: PathBuf,
    interpreters: BTreeMap<String, String>,
}

impl ProcessLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            interpreters: BTreeMap::new(),
        }
    }

    /// Extension to interpreter command, e.g. `py -> python3`
    pub fn with_interpreters(mut self, interpreters: BTreeMap<String, String>) -> Self {
        self.interpreters = interpreters;
        self
    }
}

impl ProducerLoader for ProcessLoader {
    fn load(&self, path: &Path) -> ProducersResult<Box<dyn Producer>> {
        let metadata =
            std::fs::metadata(path).map_err(|e| ProducersError::load(path, e.to_string()))?;
        if !metadata.is_file() {
            return Err(ProducersError::load(path, "not a regular file"));
        }

        let command = LaunchCommand::resolve(path, &metadata, &self.interpreters)
            .map_err(|reason| ProducersError::load(path, reason))?;

        tracing::debug!(producer = %path.display(), program = ?command.program, "loaded producer");

        Ok(Box::new(ProcessProducer {
            root: self.root.clone(),
            source: path.to_path_buf(),
            command,
        }))
    }
}

/// A producer run as a child process
#[derive(Debug, Clone)]
pub struct ProcessProducer {
    root: PathBuf,
    source: PathBuf,
    command: LaunchCommand,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireFile {
    path: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    lines: Option<Vec<String>>,
}

impl ProcessProducer {
    fn working_dir(&self) -> &Path {
        self.source.parent().unwrap_or(&self.root)
    }

    fn fail(&self, reason: impl Into<String>) -> ProducersError {
        ProducersError::execution(&self.source, reason)
    }

    fn resolve_output(&self, wire: WireFile) -> ProducersResult<ProducedFile> {
        let target = Path::new(&wire.path);
        let target = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.working_dir().join(target)
        };

        match (wire.content, wire.lines) {
            (Some(content), None) => Ok(ProducedFile::new(target, content)),
            (None, Some(lines)) => Ok(ProducedFile::from_lines(target, lines)),
            (Some(_), Some(_)) => Err(self.fail(format!(
                "output for '{}' has both 'content' and 'lines'",
                wire.path
            ))),
            (None, None) => Err(self.fail(format!(
                "output for '{}' has neither 'content' nor 'lines'",
                wire.path
            ))),
        }
    }
}

impl Producer for ProcessProducer {
    fn produce(&self, snapshot: &FileSnapshot) -> ProducersResult<Vec<ProducedFile>> {
        let input = serde_json::to_vec(snapshot.paths())
            .map_err(|e| self.fail(format!("failed to encode snapshot: {e}")))?;

        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .current_dir(self.working_dir())
            .env(PRODUCERS_ROOT_VAR, &self.root)
            .env(PRODUCER_PATH_VAR, &self.source)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                self.fail(format!(
                    "failed to start {}: {e}",
                    self.command.program.to_string_lossy()
                ))
            })?;

        // Feed stdin from a helper thread so a producer that writes a lot
        // before reading cannot deadlock against us.
        let writer = child.stdin.take().map(|mut stdin| {
            std::thread::spawn(move || match stdin.write_all(&input) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                other => other,
            })
        });

        let output = child
            .wait_with_output()
            .map_err(|e| self.fail(format!("failed to wait for process: {e}")))?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(self.fail(format!("failed to write snapshot: {e}"))),
                Err(_) => return Err(self.fail("snapshot writer panicked")),
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            let detail = stderr.trim();
            return Err(if detail.is_empty() {
                self.fail(format!("exited with {}", output.status))
            } else {
                self.fail(format!("exited with {}: {detail}", output.status))
            });
        }
        if !stderr.trim().is_empty() {
            tracing::debug!(producer = %self.source.display(), stderr = %stderr.trim(), "producer stderr");
        }

        let wire: Vec<WireFile> = serde_json::from_slice(&output.stdout)
            .map_err(|e| self.fail(format!("invalid output: {e}")))?;

        wire.into_iter().map(|w| self.resolve_output(w)).collect()
    }
}
