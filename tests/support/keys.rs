use modal_engine::{Editor, KeyCode, KeyEvent, Modifiers};

pub fn key(c: char) -> KeyEvent {
    KeyEvent::char(c)
}

pub fn esc() -> KeyEvent {
    KeyEvent::new(KeyCode::Esc)
}

pub fn enter() -> KeyEvent {
    KeyEvent::new(KeyCode::Enter)
}

pub fn backspace() -> KeyEvent {
    KeyEvent::new(KeyCode::Backspace)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::with_mods(KeyCode::Char(c), Modifiers::CTRL)
}

/// Feeds every character of `keys` as a plain key press, ignoring errors.
pub fn type_keys(editor: &mut Editor, keys: &str) {
    for c in keys.chars() {
        let _ = editor.handle_key(c);
    }
}

/// Editor over `text` with the cursor placed at (`row`, `col`).
pub fn editor_at(text: &str, row: usize, col: usize) -> Editor {
    let mut editor = Editor::with_content(text);
    editor.set_position(modal_engine::Position::new(row, col));
    editor
}
