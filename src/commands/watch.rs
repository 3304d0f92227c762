use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use producers::application::{Pipeline, WatchEvent, WatchOptions, WatchUseCase};
use producers::domain::value_objects::Mode;

use super::{prepare, run_sink};
use crate::cli::Cli;
use crate::ui::context::UiContext;
use crate::ui::views::watch::render_watch_event;

pub fn cmd_watch(cli: &Cli) -> Result<i32> {
    let (root, config) = prepare(cli)?;
    let ui = UiContext::new(cli.json, true, cli.color);
    let sink = run_sink(&ui);

    let pipeline = Pipeline::from_config(&root, Mode::from_check_flag(cli.check), &config);
    let mut use_case = WatchUseCase::new(pipeline, WatchOptions::from_config(&config));

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    let stats = use_case
        .start(running, sink.as_ref(), |event: WatchEvent| {
            if ui.json {
                println!("{}", event.to_json());
            } else {
                let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
                if let Some(line) = render_watch_event(&timestamp, &event, ui.color) {
                    eprintln!("{line}");
                }
            }
        })
        .with_context(|| format!("watch failed in {}", root.display()))?;

    tracing::debug!(
        batches = stats.batches,
        regenerations = stats.regenerations,
        failures = stats.failures,
        "watch finished"
    );
    Ok(0)
}
