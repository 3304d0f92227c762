//! Tagged report lines
//!
//! ```text
//! [PRODUCE] gen_producer.sh
//!    [OKEY] out.txt
//!   [FIXED] other.txt
//!   [ERROR] third.txt
//! ```
//!
//! In watch mode `[OKEY]` lines are dropped and a `[PRODUCE]` line is only
//! printed once one of its files is not okay.

use std::cell::RefCell;
use std::io::{self, Write};

use producers::domain::ports::{FileStatus, RunEvent, RunEventSink};
use producers::domain::value_objects::RelativePath;

use crate::ui::context::UiContext;
use crate::ui::theme::{colors, tag};

pub fn render_produce(producer: &RelativePath, color: bool) -> String {
    format!("{} {producer}", tag("[PRODUCE]", colors::PRODUCE, color))
}

pub fn render_file(status: FileStatus, path: &str, color: bool) -> String {
    let tint = match status {
        FileStatus::Okey => colors::OKEY,
        FileStatus::Fixed => colors::FIXED,
        FileStatus::Error => colors::ERROR,
    };
    format!("{} {path}", tag(status.tag(), tint, color))
}

/// Run event sink that prints report lines
pub struct ConsoleSink<W: Write> {
    out: RefCell<W>,
    color: bool,
    watch: bool,
    pending: RefCell<Option<String>>,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout(ui: &UiContext) -> Self {
        Self::new(io::stdout(), ui.color, ui.watch)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, color: bool, watch: bool) -> Self {
        Self {
            out: RefCell::new(out),
            color,
            watch,
            pending: RefCell::new(None),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, line: &str) {
        // A closed stdout must not abort the run.
        let _ = writeln!(self.out.borrow_mut(), "{line}");
    }
}

impl<W: Write> RunEventSink for ConsoleSink<W> {
    fn on_event(&self, event: RunEvent) {
        match event {
            RunEvent::Produce { producer, .. } => {
                let line = render_produce(&producer, self.color);
                if self.watch {
                    *self.pending.borrow_mut() = Some(line);
                } else {
                    self.line(&line);
                }
            }
            RunEvent::File { status, path } => {
                if self.watch && status == FileStatus::Okey {
                    return;
                }
                if let Some(header) = self.pending.borrow_mut().take() {
                    self.line(&header);
                }
                self.line(&render_file(status, &path, self.color));
            }
            RunEvent::RunComplete { .. } => {
                self.pending.borrow_mut().take();
                let _ = self.out.borrow_mut().flush();
            }
        }
    }
}
