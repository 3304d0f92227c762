//! NDJSON output
//!
//! One JSON object per line on stdout, each tagged with `"command"`
//! (`produce` for a one-shot run, `watch` in watch mode).

use std::cell::RefCell;
use std::io::{self, Write};

use producers::domain::ports::{RunEvent, RunEventSink};
use serde::Serialize;

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Serialize `event` and tag it with `command`.
pub fn tagged<T: Serialize>(event: &T, command: &str) -> serde_json::Value {
    let mut value =
        serde_json::to_value(event).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
    if let Some(obj) = value.as_object_mut() {
        obj.insert("command".to_string(), serde_json::json!(command));
    }
    value
}

/// Run event sink that writes NDJSON
pub struct JsonSink<W: Write> {
    out: RefCell<W>,
    command: &'static str,
}

impl JsonSink<io::Stdout> {
    pub fn stdout(watch: bool) -> Self {
        Self::new(io::stdout(), if watch { "watch" } else { "produce" })
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W, command: &'static str) -> Self {
        Self {
            out: RefCell::new(out),
            command,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> RunEventSink for JsonSink<W> {
    fn on_event(&self, event: RunEvent) {
        let _ = write_event(&mut *self.out.borrow_mut(), &tagged(&event, self.command));
    }
}
