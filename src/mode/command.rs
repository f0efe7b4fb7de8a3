use crate::editor::EditorCore;
use crate::error::EditorError;
use crate::key::{KeyCode, KeyEvent};
use crate::mode::ModeHandler;
use crate::signal::Signal;
use crate::types::ModeKind;

/// The `:` command line.
#[derive(Debug, Default)]
pub struct CommandMode {
    line: String,
}

impl CommandMode {
    fn show(&self, core: &mut EditorCore) {
        core.set_command_line(format!(":{}", self.line));
    }
}

impl ModeHandler for CommandMode {
    fn enter(&mut self, core: &mut EditorCore, _prev: ModeKind) {
        self.line.clear();
        core.state.pending_count.clear();
        core.emit(Signal::CommandEntered);
        core.set_status("");
        self.show(core);
    }

    fn exit(&mut self, core: &mut EditorCore, _next: ModeKind) {
        self.line.clear();
        core.set_command_line("");
    }

    fn handle_key(&mut self, core: &mut EditorCore, key: KeyEvent) -> Result<(), EditorError> {
        match key.code {
            KeyCode::Esc => {
                core.request_mode(ModeKind::Normal);
            }
            KeyCode::Backspace => {
                if self.line.pop().is_some() {
                    self.show(core);
                } else {
                    core.request_mode(ModeKind::Normal);
                }
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.line);
                core.request_mode(ModeKind::Normal);
                // Failures go to the host as signals; the key itself succeeded.
                if let Err(err) = core.execute_command(&input) {
                    core.report(&err);
                }
            }
            _ => {
                if let Some(c) = key.literal() {
                    self.line.push(c);
                    self.show(core);
                }
            }
        }
        Ok(())
    }
}
