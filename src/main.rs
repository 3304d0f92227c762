//! Producers CLI - keeps generated files in sync with the programs that produce them
//!
//! Usage: producers [DIR] [--check] [--watch]
//!
//! Every file named `*_producer.<ext>` under DIR is run against a listing of
//! the whole tree; the files it returns are compared with what is on disk and
//! either fixed (default) or reported (`--check`, exit 1 on mismatch).

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let code = if cli.watch {
        commands::cmd_watch(&cli)?
    } else {
        commands::cmd_produce(&cli)?
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
