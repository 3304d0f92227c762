use producers::application::WatchEvent;

use crate::ui::theme::colors;
use crossterm::style::Stylize;

/// Status line for a watch event, or `None` for events only shown in JSON.
pub fn render_watch_event(timestamp: &str, event: &WatchEvent, color: bool) -> Option<String> {
    let prefix = format!("[{timestamp}]");

    let line = match event {
        WatchEvent::WatchStarted { root, mode, .. } => {
            format!("{prefix} Watching {root} ({mode} mode). Press Ctrl+C to stop.")
        }
        WatchEvent::Regenerating { trigger } => format!("{prefix} Change: {trigger}"),
        WatchEvent::RegenerationFailed { message } => {
            let label = if color {
                "Regeneration failed:".with(colors::ERROR).bold().to_string()
            } else {
                "Regeneration failed:".to_string()
            };
            format!("{prefix} {label} {message}")
        }
        WatchEvent::Shutdown => format!("{prefix} Watch stopped."),
        WatchEvent::Batch { .. } | WatchEvent::RegenerationComplete { .. } => return None,
    };
    Some(line)
}
