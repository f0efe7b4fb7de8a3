use std::cell::RefCell;
use std::rc::Rc;

use modal_engine::{Clipboard, ClipboardError};

/// Clipboard whose contents stay visible to the test after the editor takes it.
#[derive(Default, Debug, Clone)]
pub struct MockClipboard {
    content: Rc<RefCell<String>>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::default();
        *clipboard.content.borrow_mut() = text.to_string();
        clipboard
    }

    pub fn get(&self) -> String {
        self.content.borrow().clone()
    }
}

impl Clipboard for MockClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        Ok(self.content.borrow().clone())
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self.content.borrow_mut() = text.to_string();
        Ok(())
    }
}

/// A clipboard backend that always fails.
#[derive(Default, Debug, Clone, Copy)]
pub struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        Err(ClipboardError::Unavailable)
    }

    fn write(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Backend("write rejected".into()))
    }
}

/// Editor over `text` sharing `clipboard` with the caller.
pub fn editor_with_clipboard(text: &str, clipboard: &MockClipboard) -> modal_engine::Editor {
    modal_engine::Editor::builder()
        .content(text)
        .clipboard(clipboard.clone())
        .build()
}
