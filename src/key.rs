use std::fmt;

/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    /// A key that produces a literal character. Shifted letters should be
    /// delivered already upper-cased ('A' rather than 'a' + SHIFT).
    Char(char),
    /// The Enter/Return key.
    Enter,
    /// The Tab key.
    Tab,
    /// The Backspace key for deleting characters in insert/command/search modes.
    Backspace,
    /// The Escape key, used to exit modes and cancel pending operations.
    Esc,
    /// The space bar, when the host reports it symbolically.
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Insert,
    /// Anything the host could not map.
    Unknown,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
///
/// This represents a single key press, including any modifier keys held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::empty(),
        }
    }

    pub const fn with_mods(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// Shorthand for an unmodified character key.
    pub const fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    /// The literal character this key would insert, if any.
    ///
    /// `Space` and `Tab` count as literals so that text-entry modes can treat
    /// them like any other character.
    pub fn literal(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) => Some(c),
            KeyCode::Space => Some(' '),
            KeyCode::Tab => Some('\t'),
            _ => None,
        }
    }

    /// The character of a plain `Char` key, ignoring symbolic keys.
    pub fn as_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_ctrl(&self, c: char) -> bool {
        self.mods.contains(Modifiers::CTRL) && self.code == KeyCode::Char(c)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        KeyEvent::new(code)
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        KeyEvent::char(c)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.mods.contains(Modifiers::CTRL) {
            parts.push("Ctrl".into());
        }
        if self.mods.contains(Modifiers::ALT) {
            parts.push("Alt".into());
        }
        if self.mods.contains(Modifiers::SHIFT) {
            parts.push("Shift".into());
        }
        if self.mods.contains(Modifiers::META) {
            parts.push("Meta".into());
        }
        let key = match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Esc => "Escape".into(),
            KeyCode::Space => "Space".into(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Insert => "Insert".into(),
            KeyCode::Unknown => "Unknown".into(),
        };
        parts.push(key);
        write!(f, "{}", parts.join("+"))
    }
}
