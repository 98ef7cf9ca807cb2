//! Terminal rendition of the client's UI signals.

use std::fmt;
use std::io::{BufRead, Write};

use todo_core::view::{self, EMPTY_MESSAGE, LOAD_ERROR_MESSAGE};
use todo_core::{BackendStatus, ListView, Stats, Todo, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Text,
    Html,
}

/// Writes every signal to `out` and reads confirmations from `input`.
pub struct TerminalUi<W, R> {
    out: W,
    input: R,
    format: ListFormat,
    assume_yes: bool,
}

impl<W: Write, R: BufRead> TerminalUi<W, R> {
    pub fn new(out: W, input: R, format: ListFormat, assume_yes: bool) -> Self {
        Self {
            out,
            input,
            format,
            assume_yes,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{line}") {
            log::warn!("writing to terminal failed: {e}");
        }
    }
}

impl<W: Write, R: BufRead> Ui for TerminalUi<W, R> {
    fn show_todos(&mut self, list: &ListView) {
        if self.format == ListFormat::Html {
            let html = view::render_list_html(list);
            self.emit(format_args!("{html}"));
            return;
        }
        match list {
            ListView::Empty => self.emit(format_args!("{EMPTY_MESSAGE}")),
            ListView::Failed => self.emit(format_args!("{LOAD_ERROR_MESSAGE}")),
            ListView::Items(todos) => {
                for todo in todos {
                    let line = text_line(todo);
                    self.emit(format_args!("{line}"));
                }
            }
        }
    }

    fn show_stats(&mut self, stats: &Stats) {
        self.emit(format_args!(
            "created {} | updated {} | deleted {} | db reads {}",
            stats.todos_created, stats.todos_updated, stats.todos_deleted, stats.db_reads
        ));
    }

    fn show_status(&mut self, status: &BackendStatus) {
        self.emit(format_args!("backend: {}", status.label()));
    }

    fn alert(&mut self, message: &str) {
        self.emit(format_args!("! {message}"));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if let Err(e) = write!(self.out, "{prompt} [y/N] ").and_then(|()| self.out.flush()) {
            log::warn!("writing prompt failed: {e}");
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                log::warn!("reading confirmation failed: {e}");
                false
            }
        }
    }

    /// Inputs are command-line arguments; there is nothing to clear.
    fn clear_inputs(&mut self) {}
}

fn text_line(todo: &Todo) -> String {
    let mark = if todo.completed { "x" } else { " " };
    let mut line = format!("[{mark}] {:>4}  {}", todo.id, todo.title);
    if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(" - ");
        line.push_str(description);
    }
    if let Some(updated) = &todo.updated_at {
        line.push_str(&format!("  (updated {})", view::format_timestamp(updated)));
    }
    line
}
