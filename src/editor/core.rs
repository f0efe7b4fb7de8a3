use flume::Receiver;
use tracing::{debug, trace};

use crate::buffer::{Buffer, SearchOptions};
use crate::command::ExCommand;
use crate::config::EditorConfig;
use crate::cursor::{Cursor, first_non_blank};
use crate::error::{EditorError, ErrorKind};
use crate::history::History;
use crate::signal::{Message, Signal, SignalSender, signal_channel};
use crate::state::{EditorState, SearchState};
use crate::traits::{Clipboard, MemoryClipboard};
use crate::types::{ModeKind, Position, SelectionKind, TextRange, normalize_selection};

/// Whether a copy is a plain yank or the first half of a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    Yank,
    Cut,
}

/// Everything the modes operate on: the document, editor state, history,
/// clipboard and the outbound signal queue.
///
/// Modes never switch modes directly; they call [`EditorCore::request_mode`]
/// and the [`Editor`](crate::Editor) performs the exit/enter sequence once
/// the key has been handled.
pub struct EditorCore {
    pub(crate) buffer: Buffer,
    pub(crate) state: EditorState,
    pub(crate) history: History,
    clipboard: Box<dyn Clipboard>,
    signals: SignalSender,
    receiver: Receiver<Signal>,
    mode_request: Option<ModeKind>,
}

impl EditorCore {
    pub(crate) fn new(config: &EditorConfig, clipboard: Option<Box<dyn Clipboard>>) -> Self {
        let (signals, receiver) = signal_channel(config.signal_capacity);
        let mut core = Self {
            buffer: Buffer::new(),
            state: EditorState::new(config),
            history: History::new(config.max_history),
            clipboard: clipboard.unwrap_or_else(|| Box::new(MemoryClipboard::new())),
            signals,
            receiver,
            mode_request: None,
        };
        core.save_history();
        core
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cursor(&self) -> Cursor {
        self.buffer.cursor()
    }

    pub(crate) fn set_cursor(&mut self, cursor: Cursor) {
        self.buffer.set_cursor(cursor);
    }

    /// Moves the cursor and recomputes its preferred column.
    pub(crate) fn move_cursor_to(&mut self, position: Position) {
        self.buffer.set_position(position);
        let mut cursor = self.buffer.cursor();
        cursor.preferred = cursor.position.col % self.width();
        self.buffer.set_cursor(cursor);
    }

    /// Rendering width for sticky-column math, never zero.
    pub(crate) fn width(&self) -> usize {
        self.state.viewport.available_width.max(1)
    }

    pub(crate) fn receiver(&self) -> Receiver<Signal> {
        self.receiver.clone()
    }

    pub(crate) fn set_clipboard(&mut self, clipboard: Box<dyn Clipboard>) {
        self.clipboard = clipboard;
    }

    pub fn emit(&self, signal: Signal) {
        self.signals.send(signal);
    }

    /// Reports `err` to the host as an `Error` signal.
    pub fn report(&self, err: &EditorError) {
        self.report_kind(err.kind(), err.to_string());
    }

    pub(crate) fn report_kind(&self, kind: ErrorKind, detail: String) {
        self.emit(Signal::Error { kind, detail });
    }

    /// Asks for a switch to `mode`; ignored when that mode is disabled.
    pub fn request_mode(&mut self, mode: ModeKind) -> bool {
        if !self.state.mode_enabled(mode) {
            trace!(mode = %mode, "mode switch refused; mode disabled");
            return false;
        }
        self.mode_request = Some(mode);
        true
    }

    pub(crate) fn take_mode_request(&mut self) -> Option<ModeKind> {
        self.mode_request.take()
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.state.status_line = status.into();
    }

    pub(crate) fn set_command_line(&mut self, line: impl Into<String>) {
        self.state.command_line = line.into();
    }

    /// Drops any pending count and clears its echo on the command line.
    pub(crate) fn reset_pending_count(&mut self) {
        if !self.state.pending_count.is_empty() {
            self.state.pending_count.clear();
            self.state.command_line.clear();
        }
    }

    /// Consumes the pending count, defaulting to 1.
    pub(crate) fn take_count(&mut self) -> usize {
        let had_count = !self.state.pending_count.is_empty();
        let count = self.state.pending_count.take_or(1);
        if had_count {
            self.state.command_line.clear();
        }
        count
    }

    pub fn scroll_viewport(&mut self) {
        let row = self.buffer.cursor().position.row;
        self.state.viewport.scroll_to(row);
    }

    /// Replaces the document. The new text counts as saved and history restarts.
    pub fn set_content(&mut self, text: &str) {
        self.buffer = Buffer::from_text(text);
        self.state.viewport.top_line = 0;
        self.history.clear();
        self.save_history();
    }

    pub fn save_history(&mut self) {
        self.history.save(self.buffer.content(), self.buffer.cursor());
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        let before = self.buffer.content();
        let entry = self.history.undo()?.clone();
        self.buffer.set_content(&entry.content);
        self.buffer.set_cursor(entry.cursor);
        self.scroll_viewport();
        self.emit(Signal::Undo(before));
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditorError> {
        let before = self.buffer.content();
        let entry = self.history.redo()?.clone();
        self.buffer.set_content(&entry.content);
        self.buffer.set_cursor(entry.cursor);
        self.scroll_viewport();
        self.emit(Signal::Redo(before));
        Ok(())
    }

    /// The active selection as an operator range, if a visual mode is active.
    pub fn selection_range(&self) -> Option<TextRange> {
        let anchor = self.state.visual_anchor?;
        let cursor = self.buffer.cursor().position;
        let (start, end) = normalize_selection(anchor, cursor);
        match self.state.mode {
            ModeKind::VisualLine => Some(TextRange::lines(start.row, end.row)),
            ModeKind::Visual => Some(TextRange::chars(start, self.inclusive_end(end))),
            _ => None,
        }
    }

    /// Exclusive end of a character-wise span whose last character is at `pos`.
    /// Past the end of a line the span takes the line break with it.
    pub(crate) fn inclusive_end(&self, pos: Position) -> Position {
        let len = self.buffer.line_len(pos.row);
        if pos.col < len {
            Position::new(pos.row, pos.col + 1)
        } else if pos.row + 1 < self.buffer.line_count() {
            Position::new(pos.row + 1, 0)
        } else {
            Position::new(pos.row, len)
        }
    }

    /// Classifies `pos` against the active selection, for rendering only.
    pub fn selection_status(&self, pos: Position) -> SelectionKind {
        let Some(anchor) = self.state.visual_anchor else {
            return SelectionKind::None;
        };
        let (start, end) = normalize_selection(anchor, self.buffer.cursor().position);
        match self.state.mode {
            ModeKind::VisualLine if (start.row..=end.row).contains(&pos.row) => SelectionKind::Line,
            ModeKind::Visual if start <= pos && pos <= end => SelectionKind::Character,
            _ => SelectionKind::None,
        }
    }

    /// Copies the selection, or the current line when nothing is selected.
    ///
    /// A yank also emits a `Yank` signal; a cut leaves signalling to the
    /// delete that follows it.
    pub fn copy(&mut self, kind: CopyKind) -> Result<String, EditorError> {
        let range = self.selection_range().unwrap_or_else(|| {
            let row = self.buffer.cursor().position.row;
            TextRange::lines(row, row)
        });
        let text = self.buffer.text_in(range);
        self.clipboard.write(&text)?;
        if kind == CopyKind::Yank {
            self.emit(Signal::Yank(text.clone()));
        }
        Ok(text)
    }

    /// Writes the text of `range` to the clipboard and emits `Yank`.
    pub(crate) fn yank_range(&mut self, range: TextRange) -> Result<String, EditorError> {
        let text = self.buffer.text_in(range);
        self.clipboard.write(&text)?;
        self.emit(Signal::Yank(text.clone()));
        Ok(text)
    }

    pub(crate) fn write_clipboard(&mut self, text: &str) -> Result<(), EditorError> {
        self.clipboard.write(text)?;
        Ok(())
    }

    pub(crate) fn read_clipboard(&mut self) -> Result<String, EditorError> {
        self.clipboard.read().map_err(EditorError::PasteFailed)
    }

    /// Inserts the clipboard at the cursor and leaves the cursor after it.
    pub fn paste(&mut self) -> Result<(), EditorError> {
        let text = self.read_clipboard()?;
        let at = self.buffer.cursor().position;
        let end = self.buffer.insert_at(at.row, at.col, &text)?;
        self.move_cursor_to(end);
        self.save_history();
        self.emit(Signal::Paste(text));
        Ok(())
    }

    /// Deletes `range` with a single buffer mutation and returns the removed text.
    ///
    /// The cursor lands on the start of a character-wise range, or on the first
    /// non-blank of the row that replaces a line-wise one. Emits `Delete` and
    /// records one history entry.
    pub(crate) fn delete_range(&mut self, range: TextRange) -> Result<String, EditorError> {
        if range.is_empty() {
            return Ok(String::new());
        }
        let deleted = if range.linewise {
            self.delete_lines(range.start.row, range.end.row)?
        } else {
            let end = self.clamp_position(range.end);
            let count = self.buffer.distance(range.start, end);
            let deleted = self.buffer.delete_at(range.start.row, range.start.col, count)?;
            self.move_cursor_to(range.start);
            deleted
        };
        self.save_history();
        self.emit(Signal::Delete(deleted.clone()));
        Ok(deleted)
    }

    fn delete_lines(&mut self, first: usize, last: usize) -> Result<String, EditorError> {
        let last_row = self.buffer.line_count() - 1;
        let last = last.min(last_row);
        let text = self.buffer.text_in(TextRange::lines(first, last));

        let (from, to) = if last < last_row {
            (Position::new(first, 0), Position::new(last + 1, 0))
        } else if first > 0 {
            // Removing the tail of the buffer takes the preceding line break.
            let prev = Position::new(first - 1, self.buffer.line_len(first - 1));
            (prev, Position::new(last, self.buffer.line_len(last)))
        } else {
            (Position::ZERO, Position::new(last, self.buffer.line_len(last)))
        };
        let count = self.buffer.distance(from, to);
        self.buffer.delete_at(from.row, from.col, count)?;

        let row = first.min(self.buffer.line_count() - 1);
        let col = first_non_blank(&self.buffer, row);
        self.move_cursor_to(Position::new(row, col));
        Ok(text)
    }

    /// Empties rows `first..=last` into a single blank row, for `cc` and `S`-like changes.
    pub(crate) fn clear_lines(&mut self, first: usize, last: usize) -> Result<String, EditorError> {
        let last = last.min(self.buffer.line_count() - 1);
        let text = self.buffer.text_in(TextRange::lines(first, last));
        let end = Position::new(last, self.buffer.line_len(last));
        let count = self.buffer.distance(Position::new(first, 0), end);
        self.buffer.delete_at(first, 0, count)?;
        self.move_cursor_to(Position::new(first, 0));
        self.save_history();
        self.emit(Signal::Delete(text.clone()));
        Ok(text)
    }

    fn clamp_position(&self, pos: Position) -> Position {
        let row = pos.row.min(self.buffer.line_count() - 1);
        Position::new(row, pos.col.min(self.buffer.line_len(row)))
    }

    /// Pulls a cursor sitting past the last character back onto it.
    pub(crate) fn clamp_cursor_to_char(&mut self) {
        let pos = self.buffer.cursor().position;
        let len = self.buffer.line_len(pos.row);
        if len > 0 && pos.col >= len {
            self.move_cursor_to(Position::new(pos.row, len - 1));
        }
    }

    /// Submits a search pattern, moving to the first match after the cursor.
    ///
    /// A pattern with an upper-case letter is case sensitive; otherwise the
    /// search ignores case. An empty pattern clears the search.
    pub fn search(&mut self, pattern: &str) {
        if pattern.is_empty() {
            self.state.search = SearchState::default();
            self.emit(Signal::SearchResults(Vec::new()));
            return;
        }
        let case_sensitive = pattern.chars().any(char::is_uppercase);
        let term: String = if case_sensitive {
            pattern.to_string()
        } else {
            pattern
                .chars()
                .map(|c| c.to_lowercase().next().unwrap_or(c))
                .collect()
        };
        let results = self.buffer.find_all(&term, case_sensitive);
        debug!(pattern, matches = results.len(), "search");
        self.state.search = SearchState {
            pattern: pattern.to_string(),
            term,
            case_sensitive,
            results,
            index: None,
        };
        self.jump_to_match(false);
        self.emit(Signal::SearchResults(self.state.search.results.clone()));
    }

    pub fn next_search_result(&mut self) -> bool {
        self.jump_to_match(false)
    }

    pub fn previous_search_result(&mut self) -> bool {
        self.jump_to_match(true)
    }

    fn jump_to_match(&mut self, backwards: bool) -> bool {
        if !self.state.search.is_active() {
            return false;
        }
        let search = &self.state.search;
        let options = SearchOptions {
            case_sensitive: search.case_sensitive,
            backwards,
            wrap: true,
        };
        let found = self
            .buffer
            .find(&search.term, self.buffer.cursor().position, options);
        let results = self.buffer.find_all(&search.term, search.case_sensitive);

        let Some(pos) = found else {
            self.state.search.results = results;
            self.state.search.index = None;
            return false;
        };
        self.state.search.index = results.iter().position(|p| *p == pos);
        self.state.search.results = results;
        self.move_cursor_to(pos);
        true
    }

    /// Parses and runs a colon command.
    pub fn execute_command(&mut self, input: &str) -> Result<(), EditorError> {
        let command = ExCommand::parse(input)?;
        debug!(?command, "execute command");
        match command {
            ExCommand::Nop => {}
            ExCommand::Quit { force } => {
                if !force && self.buffer.is_modified() {
                    return Err(EditorError::UnsavedChanges);
                }
                self.quit();
            }
            ExCommand::Write { path: None } => {
                if !self.buffer.is_modified() {
                    return Err(EditorError::NoChangesToSave);
                }
                self.save(None);
            }
            ExCommand::Write { path: Some(path) } => self.save(Some(path)),
            ExCommand::WriteQuit { force: false } => {
                self.execute_command("w")?;
                self.execute_command("q")?;
            }
            ExCommand::WriteQuit { force: true } => {
                if let Err(err) = self.execute_command("w") {
                    self.report_kind(
                        ErrorKind::SaveFailed,
                        format!("write failed: {err}, quitting anyway"),
                    );
                }
                self.quit();
            }
            ExCommand::SetRelativeNumbers(enabled) => {
                self.state.relative_numbers = enabled;
                self.emit(Signal::RelativeNumbersToggled(enabled));
                self.emit(Signal::Message(if enabled {
                    Message::RelativeNumbersEnabled
                } else {
                    Message::RelativeNumbersDisabled
                }));
            }
            ExCommand::Rename(args) => match args.as_slice() {
                [name] => self.emit(Signal::Rename(name.clone())),
                _ => return Err(EditorError::RenameFailed),
            },
            ExCommand::DeleteFile => self.emit(Signal::DeleteFile),
            ExCommand::GotoLine(line) => {
                let row = (line - 1).min(self.buffer.line_count() - 1);
                self.move_cursor_to(Position::new(row, 0));
                self.scroll_viewport();
            }
        }
        Ok(())
    }

    /// Marks the content saved and hands it to the host for persistence.
    pub fn save(&mut self, path: Option<String>) {
        self.buffer.save_content();
        self.emit(Signal::Message(Message::ChangesSaved));
        self.emit(Signal::Save {
            path,
            content: self.buffer.saved_content().to_string(),
        });
    }

    pub fn quit(&mut self) {
        self.state.quit = true;
        self.emit(Signal::Quit);
    }
}
