use std::fmt;

use crate::editor::EditorCore;
use crate::error::{EditorError, ignore_boundary};
use crate::key::{KeyCode, KeyEvent, Modifiers};
use crate::mode::motion::{
    Motion, apply_motion, char_search_motion, char_search_range, motion_range, repeat_char_search,
};
use crate::mode::{ModeHandler, accept_count_digit};
use crate::signal::{Message, Signal};
use crate::text_object::{CharSearch, CharSearchKind, ObjectScope, word_object};
use crate::types::{ModeKind, Position, TextRange};

/// Operators that wait for a motion or text object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Yank,
    Change,
}

impl Operator {
    fn from_key(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Delete),
            'y' => Some(Self::Yank),
            'c' => Some(Self::Change),
            _ => None,
        }
    }

    fn key(self) -> char {
        match self {
            Self::Delete => 'd',
            Self::Yank => 'y',
            Self::Change => 'c',
        }
    }

    fn edits(self) -> bool {
        !matches!(self, Self::Yank)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Multi-key sequence parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pending {
    #[default]
    Idle,
    /// `d`, `y` or `c` typed; waiting for a motion, the same letter, `i`/`a`
    /// or a character search.
    AwaitingMotion(Operator),
    /// Operator then `i`/`a`; waiting for the object letter.
    AwaitingTextObject(Operator, ObjectScope),
    /// `f`/`F`/`t`/`T`, possibly after an operator; waiting for the target.
    AwaitingCharSearchTarget(Option<Operator>, CharSearchKind),
}

#[derive(Debug, Default)]
pub struct NormalMode {
    pending: Pending,
    /// Count typed before the operator, kept apart from the motion's count.
    op_count: Option<usize>,
    /// Keys of the unfinished sequence, echoed on the command line.
    typed: String,
}

impl NormalMode {
    pub fn pending(&self) -> Pending {
        self.pending
    }

    fn reset(&mut self) {
        self.pending = Pending::Idle;
        self.op_count = None;
        self.typed.clear();
    }

    fn echo(&self, core: &mut EditorCore) {
        let count = core
            .state
            .pending_count
            .get()
            .map(|n| n.to_string())
            .unwrap_or_default();
        core.set_command_line(format!("{}{count}", self.typed));
    }

    fn push_key(&mut self, core: &mut EditorCore, c: char) {
        if let Some(n) = core.state.pending_count.get() {
            self.typed.push_str(&n.to_string());
        }
        self.typed.push(c);
        core.set_command_line(self.typed.clone());
    }

    /// Count for an operator sequence: the product of the counts typed
    /// before and after the operator.
    fn take_operator_count(&mut self, core: &mut EditorCore) -> Option<usize> {
        let motion_count = core.state.pending_count.take();
        match (self.op_count.take(), motion_count) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(1).saturating_mul(b.unwrap_or(1))),
        }
    }

    fn handle_idle(&mut self, core: &mut EditorCore, key: KeyEvent) -> Result<(), EditorError> {
        let editable = core.state.modes.insert;

        if key.is_ctrl('r') {
            return core.redo();
        }
        if key.mods.intersects(Modifiers::CTRL | Modifiers::ALT) {
            return Ok(());
        }

        if let Some(motion) = Motion::from_key(&key) {
            let count = core.state.pending_count.take();
            return ignore_boundary(apply_motion(core, motion, count));
        }

        let KeyCode::Char(c) = key.code else {
            return Ok(());
        };

        if let Some(kind) = CharSearchKind::from_key(c) {
            self.push_key(core, c);
            self.pending = Pending::AwaitingCharSearchTarget(None, kind);
            return Ok(());
        }
        if let Some(op) = Operator::from_key(c) {
            if op.edits() && !editable {
                return Ok(());
            }
            self.push_key(core, c);
            self.op_count = core.state.pending_count.take();
            self.pending = Pending::AwaitingMotion(op);
            return Ok(());
        }

        let width = core.width();
        match c {
            '0' => {
                let mut cursor = core.cursor();
                cursor.move_to_line_start();
                core.set_cursor(cursor);
            }
            'i' => {
                core.request_mode(ModeKind::Insert);
            }
            'I' if editable => {
                let mut cursor = core.cursor();
                cursor.move_to_first_non_blank(&core.buffer, width);
                core.set_cursor(cursor);
                core.request_mode(ModeKind::Insert);
            }
            'a' if editable => {
                let mut cursor = core.cursor();
                ignore_boundary(cursor.move_right(&core.buffer, 1, width))?;
                core.set_cursor(cursor);
                core.request_mode(ModeKind::Insert);
            }
            'A' if editable => {
                let mut cursor = core.cursor();
                cursor.move_to_after_line_end(&core.buffer, width);
                core.set_cursor(cursor);
                core.request_mode(ModeKind::Insert);
            }
            'o' if editable => {
                let row = core.cursor().position.row;
                let len = core.buffer.line_len(row);
                let below = core.buffer.insert_at(row, len, "\n")?;
                core.move_cursor_to(below);
                core.save_history();
                core.request_mode(ModeKind::Insert);
            }
            'O' if editable => {
                let row = core.cursor().position.row;
                core.buffer.insert_at(row, 0, "\n")?;
                core.move_cursor_to(Position::new(row, 0));
                core.save_history();
                core.request_mode(ModeKind::Insert);
            }
            'v' => {
                core.request_mode(ModeKind::Visual);
            }
            'V' => {
                core.request_mode(ModeKind::VisualLine);
            }
            ':' => {
                core.request_mode(ModeKind::Command);
            }
            '/' => {
                core.request_mode(ModeKind::Search);
            }
            'n' => {
                core.next_search_result();
            }
            'N' => {
                core.previous_search_result();
            }
            ';' | ',' => {
                let count = core.take_count();
                repeat_char_search(core, c == ',', count)?;
            }
            'x' if editable => {
                let count = core.take_count();
                let pos = core.cursor().position;
                let len = core.buffer.line_len(pos.row);
                if pos.col < len {
                    let end = Position::new(pos.row, pos.col.saturating_add(count).min(len));
                    core.delete_range(TextRange::chars(pos, end))?;
                    core.clamp_cursor_to_char();
                }
            }
            'X' if editable => {
                let count = core.take_count();
                let pos = core.cursor().position;
                if pos.col == 0 {
                    return Err(EditorError::StartOfLine);
                }
                let start = Position::new(pos.row, pos.col - count.min(pos.col));
                core.delete_range(TextRange::chars(start, pos))?;
            }
            'D' if editable => {
                let count = core.state.pending_count.take();
                if let Some(range) = motion_range(core, Motion::LineEnd, count, false)? {
                    self.apply(core, Operator::Delete, range)?;
                }
            }
            'C' if editable => {
                let count = core.state.pending_count.take();
                match motion_range(core, Motion::LineEnd, count, true)? {
                    Some(range) => self.apply(core, Operator::Change, range)?,
                    None => {
                        core.request_mode(ModeKind::Insert);
                    }
                }
            }
            'p' if editable => core.paste()?,
            'u' => core.undo()?,
            'U' => core.redo()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_operator(&mut self, core: &mut EditorCore, op: Operator, key: KeyEvent) -> Result<(), EditorError> {
        if let KeyCode::Char(c) = key.code {
            if c == op.key() {
                let count = self.take_operator_count(core).unwrap_or(1);
                let row = core.cursor().position.row;
                let last = row.saturating_add(count - 1).min(core.buffer.line_count() - 1);
                return self.apply(core, op, TextRange::lines(row, last));
            }
            let scope = match c {
                'i' => Some(ObjectScope::Inner),
                'a' => Some(ObjectScope::Around),
                _ => None,
            };
            if let Some(scope) = scope {
                self.push_key(core, c);
                self.pending = Pending::AwaitingTextObject(op, scope);
                return Ok(());
            }
            if let Some(kind) = CharSearchKind::from_key(c) {
                self.push_key(core, c);
                self.pending = Pending::AwaitingCharSearchTarget(Some(op), kind);
                return Ok(());
            }
        }

        let Some(motion) = Motion::operator_target(&key) else {
            return Err(EditorError::InvalidMotion(format!("{key} after {op}")));
        };
        let count = self.take_operator_count(core);
        match motion_range(core, motion, count, op == Operator::Change)? {
            Some(range) => self.apply(core, op, range),
            None => Ok(()),
        }
    }

    fn handle_text_object(
        &mut self,
        core: &mut EditorCore,
        op: Operator,
        scope: ObjectScope,
        key: KeyEvent,
    ) -> Result<(), EditorError> {
        match key.code {
            KeyCode::Char('w') => {
                self.take_operator_count(core);
                let pos = core.cursor().position;
                let line = core.buffer.line(pos.row).unwrap_or_default();
                let Some((start, end)) = word_object(line, pos.col, scope) else {
                    return Ok(());
                };
                let range = TextRange::chars(Position::new(pos.row, start), Position::new(pos.row, end));
                self.apply(core, op, range)
            }
            _ => Err(EditorError::InvalidMotion(format!("unsupported text object {key}"))),
        }
    }

    fn handle_char_target(
        &mut self,
        core: &mut EditorCore,
        op: Option<Operator>,
        kind: CharSearchKind,
        key: KeyEvent,
    ) -> Result<(), EditorError> {
        let Some(target) = key.literal() else {
            return Ok(());
        };
        let search = CharSearch { kind, target };
        match op {
            None => {
                let count = core.take_count();
                char_search_motion(core, search, count)
            }
            Some(op) => {
                let count = self.take_operator_count(core).unwrap_or(1);
                match char_search_range(core, search, count)? {
                    Some(range) => self.apply(core, op, range),
                    None => Ok(()),
                }
            }
        }
    }

    fn apply(&mut self, core: &mut EditorCore, op: Operator, range: TextRange) -> Result<(), EditorError> {
        match op {
            Operator::Delete => {
                core.delete_range(range)?;
                if range.linewise {
                    core.emit(Signal::Message(Message::LinesDeleted));
                } else {
                    core.clamp_cursor_to_char();
                }
            }
            Operator::Yank => {
                core.yank_range(range)?;
                if !range.linewise {
                    core.move_cursor_to(range.start);
                }
            }
            Operator::Change => {
                if !range.is_empty() {
                    let text = core.buffer.text_in(range);
                    core.write_clipboard(&text)?;
                }
                if range.linewise {
                    core.clear_lines(range.start.row, range.end.row)?;
                } else {
                    core.delete_range(range)?;
                }
                core.request_mode(ModeKind::Insert);
            }
        }
        Ok(())
    }
}

impl ModeHandler for NormalMode {
    fn enter(&mut self, core: &mut EditorCore, _prev: ModeKind) {
        self.reset();
        core.state.pending_count.clear();
        core.state.visual_anchor = None;
        core.set_status("-- NORMAL --");
        core.set_command_line("");
    }

    fn exit(&mut self, core: &mut EditorCore, _next: ModeKind) {
        self.reset();
        core.state.pending_count.clear();
    }

    fn handle_key(&mut self, core: &mut EditorCore, key: KeyEvent) -> Result<(), EditorError> {
        let pending = std::mem::take(&mut self.pending);

        if matches!(pending, Pending::Idle | Pending::AwaitingMotion(_)) && accept_count_digit(core, &key) {
            self.pending = pending;
            self.echo(core);
            return Ok(());
        }

        let result = match pending {
            Pending::Idle => self.handle_idle(core, key),
            Pending::AwaitingMotion(op) => self.handle_operator(core, op, key),
            Pending::AwaitingTextObject(op, scope) => self.handle_text_object(core, op, scope, key),
            Pending::AwaitingCharSearchTarget(op, kind) => self.handle_char_target(core, op, kind, key),
        };

        if result.is_err() {
            self.pending = Pending::Idle;
        }
        if self.pending == Pending::Idle {
            self.reset();
            core.state.pending_count.clear();
            core.set_command_line("");
        }
        result
    }
}
