use crate::error::ClipboardError;

/// Clipboard capability supplied by the host.
pub trait Clipboard {
    fn read(&mut self) -> Result<String, ClipboardError>;
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard; the default when the host provides none.
#[derive(Default, Debug, Clone)]
pub struct MemoryClipboard {
    content: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.content
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        Ok(self.content.clone())
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.content = text.to_string();
        Ok(())
    }
}

/// The operating system clipboard, via `arboard`.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(|_| ClipboardError::Unavailable)?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        self.inner
            .get_text()
            .map_err(|e| ClipboardError::Backend(e.to_string()))
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Backend(e.to_string()))
    }
}
