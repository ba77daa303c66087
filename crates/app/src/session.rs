use std::io::{BufRead, Write};

use editor_state::document::Document;
use ui::command::Action;

/// View settings taken from the command line.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub width: usize,
    pub rows: usize,
    pub history_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ui::DEFAULT_ROW_WIDTH,
            rows: 16,
            history_rows: ui::DEFAULT_HISTORY_ROWS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The interactive side of the editor: a document plus the cursor the
/// user is looking at. Every edit goes through the document.
#[derive(Debug)]
pub struct Session {
    doc: Document,
    cursor: usize,
    settings: Settings,
}

impl Session {
    pub fn new(doc: Document, settings: Settings) -> Self {
        Self {
            doc,
            cursor: 0,
            settings: Settings {
                width: settings.width.max(1),
                ..settings
            },
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Keeps the cursor on an existing byte, or at 0 for an empty buffer.
    fn settle_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.doc.bytes().len().saturating_sub(1));
    }

    /// Moves the cursor to the most recently touched position.
    fn follow_history(&mut self, undone: bool) {
        let last = if undone {
            self.doc.history().peek_redo(1).next()
        } else {
            self.doc.history().peek_undo(1).next()
        };

        if let Some(index) = last.map(editor_core::enums::Command::index) {
            self.settle_cursor(index);
        }
    }

    /// Runs one parsed action and writes its feedback to `out`.
    ///
    /// # Errors
    ///
    /// Only failures writing to `out`. Editing and saving errors are
    /// reported on `out` and the session continues.
    pub fn handle(&mut self, action: Action, out: &mut impl Write) -> std::io::Result<Flow> {
        let edit = match action {
            Action::Revise { index, value } => self.doc.revise(index, value).map(|()| index),
            Action::Insert { index, value } => self.doc.insert(index, value).map(|()| index),
            Action::Remove { index } => self.doc.remove(index).map(|()| index),
            Action::Undo(n) => {
                return self.step(n, true, out);
            }
            Action::Redo(n) => {
                return self.step(n, false, out);
            }
            Action::Goto(index) => {
                if index < self.doc.bytes().len() {
                    self.cursor = index;
                    self.render(out)?;
                } else {
                    writeln!(out, "error: {}", editor_core::errors::OutOfRange {
                        index,
                        len: self.doc.bytes().len(),
                    })?;
                }

                return Ok(Flow::Continue);
            }
            Action::Print => {
                self.render(out)?;

                return Ok(Flow::Continue);
            }
            Action::Save => {
                self.save(out)?;

                return Ok(Flow::Continue);
            }
            Action::SaveQuit => {
                return Ok(if self.save(out)? {
                    Flow::Quit
                } else {
                    Flow::Continue
                });
            }
            Action::Quit => return Ok(Flow::Quit),
            Action::Help => {
                writeln!(out, "{}", ui::command::HELP)?;

                return Ok(Flow::Continue);
            }
            Action::Empty => return Ok(Flow::Continue),
            Action::Invalid(msg) => {
                writeln!(out, "{msg}")?;

                return Ok(Flow::Continue);
            }
            Action::Unknown(cmd) => {
                writeln!(out, "unknown command: {cmd} (try help)")?;

                return Ok(Flow::Continue);
            }
        };

        match edit {
            Ok(index) => {
                self.settle_cursor(index);
                self.render(out)?;
            }
            Err(err) => {
                tracing::warn!(%err, "edit rejected");
                writeln!(out, "error: {err}")?;
            }
        }

        Ok(Flow::Continue)
    }

    fn step(&mut self, n: usize, undo: bool, out: &mut impl Write) -> std::io::Result<Flow> {
        let result = if undo {
            self.doc.undo(n)
        } else {
            self.doc.redo(n)
        };

        match result {
            Ok(0) => writeln!(out, "nothing to {}", if undo { "undo" } else { "redo" })?,
            Ok(_) => {
                self.follow_history(undo);
                self.render(out)?;
            }
            Err(err) => writeln!(out, "error: {err}")?,
        }

        Ok(Flow::Continue)
    }

    /// Returns whether the save went through.
    fn save(&mut self, out: &mut impl Write) -> std::io::Result<bool> {
        match self.doc.save() {
            Ok(written) => {
                writeln!(out, "wrote {written} bytes to {}", self.doc.path().display())?;

                Ok(true)
            }
            Err(err) => {
                tracing::error!(%err, "save failed");
                writeln!(out, "save failed: {err}")?;

                Ok(false)
            }
        }
    }

    /// Prompt, read a line, handle it; until `quit`, a successful `wq` or
    /// end of input. Lines are read as raw bytes, so input that is not
    /// UTF-8 ends up as an unknown command instead of an error.
    ///
    /// # Errors
    ///
    /// Failures reading `input` or writing to `out`.
    pub fn run(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> std::io::Result<()> {
        let mut buf = Vec::new();

        self.render(out)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            buf.clear();

            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let action = ui::command::parse_command(&line);

            if self.handle(action, out)? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Hex view around the cursor, detail of the byte under it, then both
    /// history panels.
    ///
    /// # Errors
    ///
    /// Failures writing to `out`.
    pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
        let bytes = self.doc.bytes();
        let history = self.doc.history();
        let Settings {
            width,
            rows,
            history_rows,
        } = self.settings;
        let first_row = (self.cursor / width).saturating_sub(rows / 2);

        writeln!(out, "{} ({} bytes)", self.doc.path().display(), bytes.len())?;

        for line in ui::render::hex_rows(bytes, width, first_row, rows, Some(self.cursor)) {
            writeln!(out, "  {line}")?;
        }

        if let Ok(value) = bytes.get(self.cursor) {
            writeln!(out, "-- detail @ {:08X}", self.cursor)?;

            for line in ui::render::detail(value) {
                writeln!(out, "  {line}")?;
            }
        }

        writeln!(out, "-- undo stack ({})", history.undo_len())?;

        for line in ui::render::history_lines(history.undo_entries(), history_rows) {
            writeln!(out, "  {line}")?;
        }

        writeln!(out, "-- redo stack ({})", history.redo_len())?;

        for line in ui::render::history_lines(history.redo_entries(), history_rows) {
            writeln!(out, "  {line}")?;
        }

        Ok(())
    }
}
