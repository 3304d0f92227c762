//! Watch event types and options

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use notify::event::ModifyKind;
use notify::EventKind;
use serde::Serialize;

use crate::config::{Config, DEFAULT_QUEUE_CAPACITY, DEFAULT_WINDOW_MS};
use crate::domain::value_objects::Mode;

/// What a filesystem notification says happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    ContentModified,
    Created,
    Removed,
    Renamed,
    Other,
}

impl ChangeKind {
    /// Map a notify event kind; access events carry no change and map to `None`.
    pub fn from_notify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Access(_) => None,
            EventKind::Create(_) => Some(ChangeKind::Created),
            EventKind::Remove(_) => Some(ChangeKind::Removed),
            EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Renamed),
            EventKind::Modify(_) => Some(ChangeKind::ContentModified),
            EventKind::Any | EventKind::Other => Some(ChangeKind::Other),
        }
    }

    /// Anything other than an in-place content edit
    pub fn is_structural(&self) -> bool {
        !matches!(self, ChangeKind::ContentModified)
    }
}

/// One observed change under the watched root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub timestamp: DateTime<Local>,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            timestamp: Local::now(),
            kind,
        }
    }

    /// One change event per path named by a notify event.
    pub fn from_notify(event: &notify::Event) -> Vec<Self> {
        let Some(kind) = ChangeKind::from_notify(&event.kind) else {
            return Vec::new();
        };
        let timestamp = Local::now();
        event
            .paths
            .iter()
            .map(|path| Self {
                path: path.clone(),
                timestamp,
                kind,
            })
            .collect()
    }
}

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Length of each batching window (not extended by later events)
    pub window: Duration,
    /// Bound on queued notifications before overflow
    pub queue_capacity: usize,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(DEFAULT_WINDOW_MS),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl WatchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            window: Duration::from_millis(config.watch.window_ms),
            queue_capacity: config.watch.queue_capacity,
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Subscription active, initial run done
    WatchStarted {
        root: String,
        mode: Mode,
        window_ms: u64,
    },
    /// A window closed
    Batch {
        events: usize,
        regenerate: bool,
        overflowed: bool,
    },
    /// Cache invalidated and a full run is starting
    Regenerating { trigger: String },
    /// A triggered run finished
    RegenerationComplete {
        okay: usize,
        fixed: usize,
        mismatched: usize,
    },
    /// A triggered run failed; watching continues
    RegenerationFailed { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    pub fn started(root: &Path, mode: Mode, options: &WatchOptions) -> Self {
        WatchEvent::WatchStarted {
            root: root.display().to_string(),
            mode,
            window_ms: u64::try_from(options.window.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
