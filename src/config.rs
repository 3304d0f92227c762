//! Configuration module for producers
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority, applied by the binary)
//! 2. Environment variables (PRODUCERS_*)
//! 3. `producers.toml` in the target directory (or `--config`)
//! 4. Built-in defaults (lowest priority)

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProducerPattern, DEFAULT_SUFFIX};
use crate::error::{ProducersError, ProducersResult};

/// Config file name looked up in the target directory
pub const CONFIG_FILE_NAME: &str = "producers.toml";

/// Default watch batch window
pub const DEFAULT_WINDOW_MS: u64 = 500;

/// Default capacity of the watch event queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Largest accepted watch queue capacity; every slot is allocated up front
pub const MAX_QUEUE_CAPACITY: usize = 1 << 16;

/// Producer discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducersConfig {
    /// Token a file stem must end with, e.g. `gen_producer.sh`
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Sort directory listings for a reproducible producer order
    #[serde(default)]
    pub sort: bool,
}

impl Default for ProducersConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            sort: false,
        }
    }
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Fixed batch window in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Bound on queued filesystem events
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

fn default_window_ms() -> u64 {
    DEFAULT_WINDOW_MS
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `producers::application::watch = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub producers: ProducersConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    /// File extension (without dot) to interpreter command
    #[serde(default)]
    pub interpreters: BTreeMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ProducersResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ProducersResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| ProducersError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate(path)?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .rsplit('.')
                    .next()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    line: find_line_number(&content, &key),
                    suggestion: suggest_key(&key),
                    key,
                    file: path.to_path_buf(),
                }
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load `path` if it exists, otherwise defaults; env overrides applied either way.
    ///
    /// A file that exists but fails to parse is an error, not a silent default.
    pub fn load_or_default(path: &Path) -> ProducersResult<(Self, Vec<ConfigWarning>)> {
        let (config, warnings) = if path.is_file() {
            Self::load_with_warnings(path)?
        } else {
            (Self::default(), Vec::new())
        };
        Ok((config.with_env_overrides(), warnings))
    }

    /// Apply environment variable overrides (PRODUCERS_* prefix)
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, get_env: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(suffix) = get_env("PRODUCERS_SUFFIX").filter(|s| !s.is_empty()) {
            self.producers.suffix = suffix;
        }

        if let Some(val) = get_env("PRODUCERS_SORT") {
            self.producers.sort = val.to_lowercase() != "false" && val != "0";
        }

        if let Some(ms) = get_env("PRODUCERS_WINDOW_MS").and_then(|v| v.parse::<u64>().ok()) {
            if ms > 0 {
                self.watch.window_ms = ms;
            }
        }

        self
    }

    fn validate(&self, path: &Path) -> ProducersResult<()> {
        let invalid = |message: &str| ProducersError::Config {
            path: path.to_path_buf(),
            message: message.to_string(),
        };

        if self.producers.suffix.is_empty() {
            return Err(invalid("producers.suffix must not be empty"));
        }
        if self.watch.window_ms == 0 {
            return Err(invalid("watch.window_ms must be greater than zero"));
        }
        if self.watch.queue_capacity == 0 {
            return Err(invalid("watch.queue_capacity must be greater than zero"));
        }
        if self.watch.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(invalid(&format!(
                "watch.queue_capacity must be at most {MAX_QUEUE_CAPACITY}"
            )));
        }
        Ok(())
    }

    /// Naming pattern used for discovery and watch decisions
    pub fn pattern(&self) -> ProducerPattern {
        ProducerPattern::new(self.producers.suffix.clone())
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "producers",
        "suffix",
        "sort",
        "watch",
        "window_ms",
        "queue_capacity",
        "interpreters",
        "logging",
        "default",
        "modules",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = std::cmp::min(
                std::cmp::min(curr[j] + 1, prev[j + 1] + 1),
                prev[j] + cost,
            );
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.producers.suffix, "_producer");
        assert!(!config.producers.sort);
        assert_eq!(config.watch.window_ms, 500);
        assert_eq!(config.watch.queue_capacity, 1024);
        assert_eq!(config.logging.default, "warn");
        assert!(config.interpreters.is_empty());
    }

    #[test]
    fn load_full_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
[producers]
suffix = ".gen"
sort = true

[watch]
window_ms = 250

[interpreters]
py = "python3"

[logging]
default = "info"
"#,
        )
        .unwrap();

        let (config, warnings) = Config::load_with_warnings(&path).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.producers.suffix, ".gen");
        assert!(config.producers.sort);
        assert_eq!(config.watch.window_ms, 250);
        assert_eq!(config.watch.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.interpreters.get("py").map(String::as_str), Some("python3"));
        assert_eq!(config.logging.default, "info");
        assert!(config.pattern().matches("schema.gen.py"));
    }

    #[test]
    fn unknown_key_is_a_warning_with_suggestion() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[watch]\nwindow_mss = 100\n").unwrap();

        let (config, warnings) = Config::load_with_warnings(&path).unwrap();
        assert_eq!(config.watch.window_ms, DEFAULT_WINDOW_MS);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, "window_mss");
        assert_eq!(warnings[0].line, Some(2));
        assert_eq!(warnings[0].suggestion.as_deref(), Some("window_ms"));
    }

    #[test]
    fn malformed_config_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[watch\nwindow_ms = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ProducersError::Config { .. }));
    }

    #[test]
    fn zero_window_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[watch]\nwindow_ms = 0\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("window_ms"));
    }

    #[test]
    fn queue_capacity_too_large_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[watch]\nqueue_capacity = 1000000000000\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ProducersError::Config { .. }));
        assert!(err.to_string().contains("queue_capacity"), "{err}");
    }

    #[test]
    fn queue_capacity_at_limit_is_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, format!("[watch]\nqueue_capacity = {MAX_QUEUE_CAPACITY}\n")).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.watch.queue_capacity, MAX_QUEUE_CAPACITY);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let (config, warnings) =
            Config::load_or_default(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.watch.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn env_overrides_apply() {
        let config = Config::default().with_overrides_from(|key| match key {
            "PRODUCERS_SUFFIX" => Some("_gen".to_string()),
            "PRODUCERS_SORT" => Some("1".to_string()),
            "PRODUCERS_WINDOW_MS" => Some("50".to_string()),
            _ => None,
        });
        assert_eq!(config.producers.suffix, "_gen");
        assert!(config.producers.sort);
        assert_eq!(config.watch.window_ms, 50);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let config = Config::default().with_overrides_from(|key| match key {
            "PRODUCERS_SUFFIX" => Some(String::new()),
            "PRODUCERS_WINDOW_MS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.producers.suffix, "_producer");
        assert_eq!(config.watch.window_ms, DEFAULT_WINDOW_MS);
    }
}
