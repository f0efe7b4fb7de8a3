mod core;

pub use self::core::{CopyKind, EditorCore};

use flume::Receiver;
use tracing::trace;

use crate::buffer::Buffer;
use crate::config::{EditorConfig, ModeFlags};
use crate::cursor::Cursor;
use crate::error::EditorError;
use crate::key::KeyEvent;
use crate::mode::{ModeSet, Pending};
use crate::signal::Signal;
use crate::state::EditorState;
use crate::traits::Clipboard;
use crate::types::{ModeKind, Position, SelectionKind};

/// The modal editing engine: a document plus the mode that interprets keys.
pub struct Editor {
    core: EditorCore,
    modes: ModeSet,
}

pub struct EditorBuilder {
    config: EditorConfig,
    clipboard: Option<Box<dyn Clipboard>>,
    content: Option<String>,
}

impl Default for EditorBuilder {
    fn default() -> Self {
        Self {
            config: EditorConfig::default(),
            clipboard: None,
            content: None,
        }
    }
}

impl EditorBuilder {
    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_history(mut self, max: usize) -> Self {
        self.config.max_history = max;
        self
    }

    pub fn signal_capacity(mut self, capacity: usize) -> Self {
        self.config.signal_capacity = capacity;
        self
    }

    pub fn vim_mode(mut self, enabled: bool) -> Self {
        self.config.vim_mode = enabled;
        self
    }

    pub fn relative_numbers(mut self, enabled: bool) -> Self {
        self.config.relative_numbers = enabled;
        self
    }

    pub fn viewport(mut self, height: usize, width: usize) -> Self {
        self.config.viewport_height = height;
        self.config.viewport_width = width;
        self
    }

    pub fn available_width(mut self, width: usize) -> Self {
        self.config.available_width = width;
        self
    }

    pub fn modes(mut self, modes: ModeFlags) -> Self {
        self.config.modes = modes;
        self
    }

    pub fn clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Some(Box::new(clipboard));
        self
    }

    pub fn content(mut self, text: &str) -> Self {
        self.content = Some(text.to_string());
        self
    }

    pub fn build(self) -> Editor {
        let mut core = EditorCore::new(&self.config, self.clipboard);
        if let Some(text) = self.content {
            core.set_content(&text);
        }
        let mut editor = Editor {
            core,
            modes: ModeSet::new(),
        };
        editor.modes.get_mut(ModeKind::Normal).enter(&mut editor.core, ModeKind::Normal);
        if !self.config.vim_mode {
            editor.switch_mode(ModeKind::Insert);
        }
        editor
    }
}

impl Default for Editor {
    fn default() -> Self {
        EditorBuilder::default().build()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EditorBuilder {
        EditorBuilder::default()
    }

    pub fn with_content(text: &str) -> Self {
        Self::builder().content(text).build()
    }

    /// Routes one key to the current mode, then performs any mode switch it
    /// requested and scrolls the viewport to the cursor.
    ///
    /// Errors are returned to the caller; all but boundary errors are also
    /// reported through an `Error` signal.
    pub fn handle_key(&mut self, key: impl Into<KeyEvent>) -> Result<(), EditorError> {
        let key = key.into();
        let mode = self.core.state.mode;
        trace!(%key, %mode, "handle key");
        let result = self.modes.get_mut(mode).handle_key(&mut self.core, key);
        self.apply_mode_requests();
        self.core.scroll_viewport();
        if let Err(err) = &result
            && !err.is_boundary()
        {
            self.core.report(err);
        }
        result
    }

    fn apply_mode_requests(&mut self) {
        while let Some(next) = self.core.take_mode_request() {
            self.transition(next);
        }
    }

    fn transition(&mut self, next: ModeKind) {
        let prev = self.core.state.mode;
        trace!(from = %prev, to = %next, "mode transition");
        self.modes.get_mut(prev).exit(&mut self.core, next);
        self.core.state.previous_mode = prev;
        self.core.state.mode = next;
        self.modes.get_mut(next).enter(&mut self.core, prev);
    }

    /// Switches to `mode` unless it is disabled. Returns whether it switched.
    pub fn switch_mode(&mut self, mode: ModeKind) -> bool {
        if !self.core.request_mode(mode) {
            return false;
        }
        self.apply_mode_requests();
        self.core.scroll_viewport();
        true
    }

    pub fn mode(&self) -> ModeKind {
        self.core.state.mode
    }

    pub fn state(&self) -> &EditorState {
        &self.core.state
    }

    pub fn buffer(&self) -> &Buffer {
        &self.core.buffer
    }

    pub fn core(&self) -> &EditorCore {
        &self.core
    }

    pub fn cursor(&self) -> Cursor {
        self.core.cursor()
    }

    pub fn position(&self) -> Position {
        self.core.cursor().position
    }

    pub fn set_position(&mut self, position: Position) {
        self.core.move_cursor_to(position);
        self.core.scroll_viewport();
    }

    pub fn content(&self) -> String {
        self.core.buffer.content()
    }

    /// Replaces the document and restarts history.
    pub fn set_content(&mut self, text: &str) {
        self.core.set_content(text);
    }

    /// A receiver for the signal queue. Every clone drains the same queue.
    pub fn signals(&self) -> Receiver<Signal> {
        self.core.receiver()
    }

    /// State of the Normal-mode sequence parser.
    pub fn pending_operation(&self) -> Pending {
        self.modes.normal.pending()
    }

    pub fn execute_command(&mut self, command: &str) -> Result<(), EditorError> {
        let result = self.core.execute_command(command);
        self.core.scroll_viewport();
        result
    }

    pub fn save_history(&mut self) {
        self.core.save_history();
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        self.core.undo()
    }

    pub fn redo(&mut self) -> Result<(), EditorError> {
        self.core.redo()
    }

    pub fn copy(&mut self, kind: CopyKind) -> Result<String, EditorError> {
        let result = self.core.copy(kind);
        self.core.scroll_viewport();
        result
    }

    pub fn paste(&mut self) -> Result<(), EditorError> {
        let result = self.core.paste();
        self.core.scroll_viewport();
        result
    }

    pub fn search(&mut self, pattern: &str) {
        self.core.search(pattern);
        self.core.scroll_viewport();
    }

    pub fn next_search_result(&mut self) -> bool {
        let moved = self.core.next_search_result();
        self.core.scroll_viewport();
        moved
    }

    pub fn previous_search_result(&mut self) -> bool {
        let moved = self.core.previous_search_result();
        self.core.scroll_viewport();
        moved
    }

    pub fn selection_status(&self, pos: Position) -> SelectionKind {
        self.core.selection_status(pos)
    }

    pub fn set_clipboard(&mut self, clipboard: impl Clipboard + 'static) {
        self.core.set_clipboard(Box::new(clipboard));
    }

    pub fn set_max_history(&mut self, max: usize) {
        self.core.history.set_max_entries(max);
    }

    pub fn set_viewport(&mut self, height: usize, width: usize) {
        self.core.state.viewport.height = height;
        self.core.state.viewport.width = width;
        self.core.scroll_viewport();
    }

    pub fn set_available_width(&mut self, width: usize) {
        self.core.state.viewport.available_width = width;
    }

    pub fn show_relative_line_numbers(&mut self, show: bool) {
        self.core.state.relative_numbers = show;
    }

    pub fn is_vim_mode(&self) -> bool {
        self.core.state.vim_mode
    }

    /// Without modal behaviour the editor sits in Insert mode and Escape does
    /// nothing.
    pub fn disable_vim_mode(&mut self, disable: bool) {
        self.core.state.vim_mode = !disable;
        if disable {
            self.core.state.relative_numbers = false;
            self.switch_mode(ModeKind::Insert);
        } else if self.mode() == ModeKind::Insert {
            self.switch_mode(ModeKind::Normal);
        }
    }

    /// Enables or disables entering `mode`. Normal mode cannot be disabled.
    pub fn set_mode_enabled(&mut self, mode: ModeKind, enabled: bool) {
        let flags = &mut self.core.state.modes;
        match mode {
            ModeKind::Normal => {}
            ModeKind::Insert => flags.insert = enabled,
            ModeKind::Visual => flags.visual = enabled,
            ModeKind::VisualLine => flags.visual_line = enabled,
            ModeKind::Command => flags.command = enabled,
            ModeKind::Search => flags.search = enabled,
        }
    }
}
