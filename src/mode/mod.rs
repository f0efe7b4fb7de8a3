//! The modal state machine.
//!
//! Every mode implements [`ModeHandler`]. The set of modes is closed, so
//! [`ModeSet`] owns one handler per [`ModeKind`] for the editor's lifetime
//! and dispatches by kind.

mod command;
mod insert;
pub mod motion;
mod normal;
mod search;
mod visual;

pub use command::CommandMode;
pub use insert::InsertMode;
pub use normal::{NormalMode, Operator, Pending};
pub use search::SearchMode;
pub use visual::VisualMode;

use crate::editor::EditorCore;
use crate::error::EditorError;
use crate::key::{KeyEvent, Modifiers};
use crate::types::ModeKind;

pub trait ModeHandler {
    /// Called after the switch from `prev`; resets the mode's transient state.
    fn enter(&mut self, core: &mut EditorCore, prev: ModeKind);
    /// Called before the switch to `next`.
    fn exit(&mut self, core: &mut EditorCore, next: ModeKind);
    fn handle_key(&mut self, core: &mut EditorCore, key: KeyEvent) -> Result<(), EditorError>;
}

#[derive(Debug)]
pub struct ModeSet {
    pub normal: NormalMode,
    pub insert: InsertMode,
    pub visual: VisualMode,
    pub visual_line: VisualMode,
    pub command: CommandMode,
    pub search: SearchMode,
}

impl ModeSet {
    pub fn new() -> Self {
        Self {
            normal: NormalMode::default(),
            insert: InsertMode,
            visual: VisualMode::charwise(),
            visual_line: VisualMode::linewise(),
            command: CommandMode::default(),
            search: SearchMode::default(),
        }
    }

    pub fn get_mut(&mut self, kind: ModeKind) -> &mut dyn ModeHandler {
        match kind {
            ModeKind::Normal => &mut self.normal,
            ModeKind::Insert => &mut self.insert,
            ModeKind::Visual => &mut self.visual,
            ModeKind::VisualLine => &mut self.visual_line,
            ModeKind::Command => &mut self.command,
            ModeKind::Search => &mut self.search,
        }
    }
}

/// Feeds a count digit into the pending count. `0` only counts once a count
/// has started. Returns whether the key was consumed.
pub(crate) fn accept_count_digit(core: &mut EditorCore, key: &KeyEvent) -> bool {
    if key.mods.intersects(Modifiers::CTRL | Modifiers::ALT) {
        return false;
    }
    let digit = match key.as_char().and_then(|c| c.to_digit(10)) {
        Some(0) if core.state.pending_count.is_empty() => return false,
        Some(d) => d as usize,
        None => return false,
    };
    core.state.pending_count.push_digit(digit);
    if let Some(count) = core.state.pending_count.get() {
        core.set_command_line(count.to_string());
    }
    true
}
