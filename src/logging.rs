//! Diagnostic logging.
//!
//! Compact timestamped `tracing` output on stderr; stdout is reserved for
//! report lines and NDJSON events.
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! default = "warn"  # quiet by default
//!
//! [logging.modules]
//! "producers::application::watch" = "debug"
//! ```
//!
//! `RUST_LOG` takes precedence over config and `-v` flags:
//! ```bash
//! RUST_LOG=producers=debug producers --watch
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Build the filter directive string from config and `-v` count.
///
/// Each `-v` raises the default level one step (warn → info → debug → trace)
/// but never lowers a more verbose configured level.
pub fn filter_directives(config: &LoggingConfig, verbose: u8) -> String {
    const LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

    let configured = LEVELS
        .iter()
        .position(|l| l.eq_ignore_ascii_case(config.default.trim()))
        .unwrap_or(1);
    let level = if verbose == 0 {
        configured
    } else {
        configured
            .max(1 + usize::from(verbose))
            .min(LEVELS.len() - 1)
    };

    let mut directives = LEVELS[level].to_string();
    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();
    for (module, level) in modules {
        directives.push_str(&format!(",{module}={level}"));
    }
    directives
}

/// Initialize logging.
///
/// Safe to call multiple times (only the first call takes effect).
pub fn init(config: &LoggingConfig, verbose: u8) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config, verbose))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}
