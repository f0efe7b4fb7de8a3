use crate::editor::EditorCore;
use crate::error::EditorError;
use crate::key::{KeyCode, KeyEvent};
use crate::mode::ModeHandler;
use crate::signal::Signal;
use crate::types::ModeKind;

/// The `/` prompt. Returns to whichever mode opened it.
#[derive(Debug, Default)]
pub struct SearchMode {
    pattern: String,
    return_to: ModeKind,
}

impl SearchMode {
    fn show(&self, core: &mut EditorCore) {
        core.set_command_line(format!("/{}", self.pattern));
    }
}

impl ModeHandler for SearchMode {
    fn enter(&mut self, core: &mut EditorCore, prev: ModeKind) {
        self.return_to = if prev == ModeKind::Search { ModeKind::Normal } else { prev };
        self.pattern = core.state.search.pattern.clone();
        core.state.pending_count.clear();
        core.emit(Signal::SearchEntered);
        self.show(core);
    }

    fn exit(&mut self, core: &mut EditorCore, _next: ModeKind) {
        self.pattern.clear();
        core.set_command_line("");
    }

    fn handle_key(&mut self, core: &mut EditorCore, key: KeyEvent) -> Result<(), EditorError> {
        match key.code {
            KeyCode::Esc => {
                core.request_mode(self.return_to);
            }
            KeyCode::Backspace => {
                if self.pattern.pop().is_some() {
                    self.show(core);
                }
            }
            KeyCode::Enter => {
                let pattern = std::mem::take(&mut self.pattern);
                core.search(&pattern);
                core.request_mode(self.return_to);
            }
            _ => {
                if let Some(c) = key.literal() {
                    self.pattern.push(c);
                    self.show(core);
                }
            }
        }
        Ok(())
    }
}
