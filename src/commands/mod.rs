//! Command handlers for the `producers` binary

mod produce;
mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};

use producers::config::Config;
use producers::domain::ports::RunEventSink;

use crate::cli::Cli;
use crate::ui::context::UiContext;
use crate::ui::json::JsonSink;
use crate::ui::output::print_config_warnings;
use crate::ui::views::report::ConsoleSink;

pub use produce::cmd_produce;
pub use watch::cmd_watch;

/// Resolve the root, load config, and start logging.
fn prepare(cli: &Cli) -> Result<(PathBuf, Config)> {
    let root = cli
        .dir
        .canonicalize()
        .with_context(|| format!("cannot open directory {}", cli.dir.display()))?;

    let config_path = cli.config_path();
    let (config, warnings) = Config::load_or_default(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    producers::logging::init(&config.logging, cli.verbose);

    for warning in &warnings {
        tracing::warn!(key = %warning.key, file = %warning.file.display(), "unknown config key");
    }
    if !cli.json {
        print_config_warnings(&config_path, &warnings);
    }

    tracing::debug!(root = %root.display(), check = cli.check, watch = cli.watch, "starting");
    Ok((root, config))
}

fn run_sink(ui: &UiContext) -> Box<dyn RunEventSink> {
    if ui.json {
        Box::new(JsonSink::stdout(ui.watch))
    } else {
        Box::new(ConsoleSink::stdout(ui))
    }
}
