use crate::editor::{CopyKind, EditorCore};
use crate::error::{EditorError, ignore_boundary};
use crate::key::{KeyCode, KeyEvent, Modifiers};
use crate::mode::motion::{Motion, apply_motion, char_search_motion, repeat_char_search};
use crate::mode::{ModeHandler, accept_count_digit};
use crate::signal::{Message, Signal};
use crate::text_object::{CharSearch, CharSearchKind};
use crate::types::{ModeKind, Position, TextRange};

/// Character-wise (`v`) or line-wise (`V`) selection.
///
/// The anchor is set on entry and never moves; motions only move the cursor.
#[derive(Debug, Default)]
pub struct VisualMode {
    linewise: bool,
    awaiting_char: Option<CharSearchKind>,
}

impl VisualMode {
    pub fn charwise() -> Self {
        Self::default()
    }

    pub fn linewise() -> Self {
        Self {
            linewise: true,
            ..Self::default()
        }
    }

    pub fn is_linewise(&self) -> bool {
        self.linewise
    }

    fn kind(&self) -> ModeKind {
        if self.linewise { ModeKind::VisualLine } else { ModeKind::Visual }
    }

    fn selection(&self, core: &EditorCore) -> Result<TextRange, EditorError> {
        core.selection_range().ok_or(EditorError::InvalidMode)
    }

    /// `d`/`x`: one clipboard write, one deletion, one snapshot.
    fn cut(&self, core: &mut EditorCore) -> Result<(), EditorError> {
        let range = self.selection(core)?;
        core.copy(CopyKind::Cut)?;
        core.delete_range(range)?;
        if !range.linewise {
            core.clamp_cursor_to_char();
        }
        core.request_mode(ModeKind::Normal);
        Ok(())
    }

    fn change(&self, core: &mut EditorCore) -> Result<(), EditorError> {
        let range = self.selection(core)?;
        core.copy(CopyKind::Cut)?;
        if range.linewise {
            core.clear_lines(range.start.row, range.end.row)?;
        } else {
            core.delete_range(range)?;
        }
        core.request_mode(ModeKind::Insert);
        Ok(())
    }

    fn yank(&self, core: &mut EditorCore) -> Result<(), EditorError> {
        let range = self.selection(core)?;
        core.copy(CopyKind::Yank)?;
        if !range.linewise {
            core.move_cursor_to(range.start);
        }
        core.emit(Signal::Message(Message::Yanked));
        core.request_mode(ModeKind::Normal);
        Ok(())
    }

    /// Replaces the selection with the clipboard as a single undoable change.
    fn put(&self, core: &mut EditorCore) -> Result<(), EditorError> {
        let range = self.selection(core)?;
        let text = core.read_clipboard()?;
        let removed = core.buffer.text_in(range);

        let (from, to) = if range.linewise {
            let last = core.buffer.line_count() - 1;
            let end_row = range.end.row.min(last);
            (
                Position::new(range.start.row, 0),
                Position::new(end_row, core.buffer.line_len(end_row)),
            )
        } else {
            (range.start, range.end)
        };
        let count = core.buffer.distance(from, to);
        core.buffer.delete_at(from.row, from.col, count)?;
        let text = if range.linewise {
            text.strip_suffix('\n').unwrap_or(&text).to_string()
        } else {
            text
        };
        let end = core.buffer.insert_at(from.row, from.col, &text)?;
        core.move_cursor_to(end);
        core.save_history();
        core.emit(Signal::Delete(removed));
        core.emit(Signal::Paste(text));
        core.request_mode(ModeKind::Normal);
        Ok(())
    }
}

impl ModeHandler for VisualMode {
    fn enter(&mut self, core: &mut EditorCore, prev: ModeKind) {
        self.awaiting_char = None;
        core.state.pending_count.clear();
        let keep_anchor = prev.is_visual() || prev == ModeKind::Search;
        if !keep_anchor || core.state.visual_anchor.is_none() {
            core.state.visual_anchor = Some(core.cursor().position);
        }
        core.set_status(if self.linewise { "-- VISUAL LINE --" } else { "-- VISUAL --" });
        core.set_command_line("");
    }

    fn exit(&mut self, core: &mut EditorCore, next: ModeKind) {
        self.awaiting_char = None;
        core.state.pending_count.clear();
        if !next.is_visual() && next != ModeKind::Search {
            core.state.visual_anchor = None;
        }
    }

    fn handle_key(&mut self, core: &mut EditorCore, key: KeyEvent) -> Result<(), EditorError> {
        if let Some(kind) = self.awaiting_char.take() {
            let Some(target) = key.literal() else {
                core.reset_pending_count();
                return Ok(());
            };
            let count = core.take_count();
            return char_search_motion(core, CharSearch { kind, target }, count);
        }

        if accept_count_digit(core, &key) {
            return Ok(());
        }
        if key.mods.intersects(Modifiers::CTRL | Modifiers::ALT) {
            core.reset_pending_count();
            return Ok(());
        }

        if let Some(motion) = Motion::from_key(&key) {
            let count = core.state.pending_count.take();
            core.set_command_line("");
            return ignore_boundary(apply_motion(core, motion, count));
        }

        let editable = core.state.modes.insert;
        let result = match key.code {
            KeyCode::Esc => {
                core.request_mode(ModeKind::Normal);
                Ok(())
            }
            KeyCode::Char('v') => {
                core.request_mode(ModeKind::Normal);
                Ok(())
            }
            KeyCode::Char('V') => {
                let next = if self.linewise { ModeKind::Visual } else { ModeKind::VisualLine };
                core.request_mode(next);
                Ok(())
            }
            KeyCode::Char('0') => {
                let mut cursor = core.cursor();
                cursor.move_to_line_start();
                core.set_cursor(cursor);
                Ok(())
            }
            KeyCode::Char(c) if CharSearchKind::from_key(c).is_some() => {
                self.awaiting_char = CharSearchKind::from_key(c);
                core.set_command_line(c.to_string());
                return Ok(());
            }
            KeyCode::Char(c @ (';' | ',')) => {
                let count = core.take_count();
                repeat_char_search(core, c == ',', count)
            }
            KeyCode::Char('n') => {
                core.next_search_result();
                Ok(())
            }
            KeyCode::Char('N') => {
                core.previous_search_result();
                Ok(())
            }
            KeyCode::Char('/') => {
                core.request_mode(ModeKind::Search);
                Ok(())
            }
            KeyCode::Char('y') => self.yank(core),
            KeyCode::Char('d' | 'x') if editable => self.cut(core),
            KeyCode::Char('c') if editable => self.change(core),
            KeyCode::Char('p') if editable => self.put(core),
            _ => Ok(()),
        };
        core.reset_pending_count();
        if result.is_err() && core.state.mode == self.kind() {
            core.request_mode(ModeKind::Normal);
        }
        result
    }
}
