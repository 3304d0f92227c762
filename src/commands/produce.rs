use anyhow::{Context, Result};

use producers::application::Pipeline;
use producers::domain::value_objects::Mode;

use super::{prepare, run_sink};
use crate::cli::Cli;
use crate::ui::context::UiContext;

/// One run; returns the process exit code.
pub fn cmd_produce(cli: &Cli) -> Result<i32> {
    let (root, config) = prepare(cli)?;
    let ui = UiContext::new(cli.json, false, cli.color);
    let sink = run_sink(&ui);

    let mut pipeline = Pipeline::from_config(&root, Mode::from_check_flag(cli.check), &config);
    let outcome = pipeline
        .run(sink.as_ref())
        .with_context(|| format!("run failed in {}", root.display()))?;

    tracing::debug!(
        okay = outcome.okay.len(),
        fixed = outcome.fixed.len(),
        mismatched = outcome.mismatched.len(),
        "run complete"
    );
    Ok(outcome.exit_code())
}
