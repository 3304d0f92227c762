use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// When to color console output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorWhen {
    #[default]
    Auto,
    Always,
    Never,
}

/// Producers - run every `*_producer.<ext>` under a directory and keep its
/// generated files in sync
#[derive(Parser, Debug)]
#[command(name = "producers")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Report divergent files without writing them (exit 1 on mismatch)
    #[arg(long)]
    pub check: bool,

    /// Keep running and regenerate on structural changes
    #[arg(short, long)]
    pub watch: bool,

    /// Emit NDJSON events instead of report lines
    #[arg(long)]
    pub json: bool,

    /// Config file (defaults to DIR/producers.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto)]
    pub color: ColorWhen,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Config path: `--config` or `producers.toml` inside the root
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.dir.join(producers::config::CONFIG_FILE_NAME))
    }
}
