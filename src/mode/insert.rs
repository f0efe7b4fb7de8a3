use crate::editor::EditorCore;
use crate::error::{EditorError, ignore_boundary};
use crate::key::{KeyCode, KeyEvent, Modifiers};
use crate::mode::ModeHandler;
use crate::types::{ModeKind, Position};

/// Text entry. Every edit is one buffer mutation followed by one snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertMode;

impl InsertMode {
    fn insert(&self, core: &mut EditorCore, text: &str) -> Result<(), EditorError> {
        let pos = core.cursor().position;
        let end = core.buffer.insert_at(pos.row, pos.col, text)?;
        core.move_cursor_to(end);
        core.save_history();
        Ok(())
    }

    fn backspace(&self, core: &mut EditorCore) -> Result<(), EditorError> {
        let pos = core.cursor().position;
        let target = if pos.col > 0 {
            Position::new(pos.row, pos.col - 1)
        } else if pos.row > 0 {
            // Joins with the previous line by removing its line break.
            Position::new(pos.row - 1, core.buffer.line_len(pos.row - 1))
        } else {
            return Err(EditorError::StartOfBuffer);
        };
        core.buffer.delete_at(target.row, target.col, 1)?;
        core.move_cursor_to(target);
        core.save_history();
        Ok(())
    }

    fn delete_forward(&self, core: &mut EditorCore) -> Result<(), EditorError> {
        let pos = core.cursor().position;
        let at_end = pos.col >= core.buffer.line_len(pos.row);
        if at_end && pos.row + 1 >= core.buffer.line_count() {
            return Err(EditorError::EndOfBuffer);
        }
        core.buffer.delete_at(pos.row, pos.col, 1)?;
        core.move_cursor_to(pos);
        core.save_history();
        Ok(())
    }

    fn navigate(&self, core: &mut EditorCore, code: KeyCode) -> Result<(), EditorError> {
        let width = core.width();
        let mut cursor = core.cursor();
        let buffer = &core.buffer;
        let moved = match code {
            KeyCode::Left => cursor.move_left_or_up(buffer, 1, width),
            KeyCode::Right => cursor.move_right_or_down(buffer, 1, width),
            KeyCode::Up => cursor.move_up(buffer, 1, width),
            KeyCode::Down => cursor.move_down(buffer, 1, width),
            KeyCode::Home => {
                cursor.move_to_line_start();
                Ok(())
            }
            KeyCode::End => {
                cursor.move_to_after_line_end(buffer, width);
                Ok(())
            }
            _ => Ok(()),
        };
        core.set_cursor(cursor);
        // Refreshes the cursor stored with the current snapshot.
        core.save_history();
        ignore_boundary(moved)
    }
}

impl ModeHandler for InsertMode {
    fn enter(&mut self, core: &mut EditorCore, _prev: ModeKind) {
        core.state.pending_count.clear();
        core.state.visual_anchor = None;
        core.set_status("-- INSERT --");
        core.set_command_line("");
        core.save_history();
    }

    fn exit(&mut self, _core: &mut EditorCore, _next: ModeKind) {}

    fn handle_key(&mut self, core: &mut EditorCore, key: KeyEvent) -> Result<(), EditorError> {
        match key.code {
            KeyCode::Esc => {
                if core.state.vim_mode {
                    core.request_mode(ModeKind::Normal);
                }
                Ok(())
            }
            KeyCode::Backspace => self.backspace(core),
            KeyCode::Delete => self.delete_forward(core),
            KeyCode::Enter => self.insert(core, "\n"),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Home | KeyCode::End => {
                self.navigate(core, key.code)
            }
            _ if key.mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META) => Ok(()),
            _ => match key.literal() {
                Some(c) => self.insert(core, c.encode_utf8(&mut [0; 4])),
                None => Ok(()),
            },
        }
    }
}
