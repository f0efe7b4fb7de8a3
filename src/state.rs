use crate::config::{EditorConfig, ModeFlags};
use crate::text_object::CharSearch;
use crate::types::{ModeKind, Position};

/// Visible window geometry. The host writes the sizes; the editor only
/// moves `top_line` to keep the cursor row visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub top_line: usize,
    pub height: usize,
    pub width: usize,
    pub available_width: usize,
}

impl Viewport {
    /// Scrolls the least amount needed so `row` lies in `[top_line, top_line + height)`.
    pub fn scroll_to(&mut self, row: usize) {
        let height = self.height.max(1);
        if row < self.top_line {
            self.top_line = row;
        } else if row >= self.top_line + height {
            self.top_line = row + 1 - height;
        }
    }
}

/// The last submitted search and its cached matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    /// Pattern exactly as typed.
    pub pattern: String,
    /// Pattern as matched: lower-cased unless the search is case sensitive.
    pub term: String,
    pub case_sensitive: bool,
    pub results: Vec<Position>,
    /// Index into `results` of the match the cursor was last moved to.
    pub index: Option<usize>,
}

impl SearchState {
    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
    }
}

/// Numeric prefix typed before a command, e.g. the `3` in `3dw`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingCount {
    current: Option<usize>,
}

impl PendingCount {
    pub fn get(&self) -> Option<usize> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Appends a decimal digit, saturating on overflow.
    pub fn push_digit(&mut self, d: usize) {
        let next = self
            .current
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(d);
        self.current = Some(next);
    }

    /// Consumes the count, returning `default_` when none was typed.
    pub fn take_or(&mut self, default_: usize) -> usize {
        let v = self.current.take().unwrap_or(default_);
        v.max(1)
    }

    pub fn take(&mut self) -> Option<usize> {
        self.current.take()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Everything a renderer needs besides the buffer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditorState {
    pub mode: ModeKind,
    pub previous_mode: ModeKind,
    pub status_line: String,
    pub command_line: String,
    pub quit: bool,
    pub viewport: Viewport,
    /// Fixed end of the active selection, `None` outside the visual modes.
    pub visual_anchor: Option<Position>,
    pub pending_count: PendingCount,
    pub search: SearchState,
    pub last_char_search: Option<CharSearch>,
    pub modes: ModeFlags,
    pub relative_numbers: bool,
    pub vim_mode: bool,
}

impl EditorState {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            mode: ModeKind::Normal,
            previous_mode: ModeKind::Normal,
            status_line: String::new(),
            command_line: String::new(),
            quit: false,
            viewport: Viewport {
                top_line: 0,
                height: config.viewport_height,
                width: config.viewport_width,
                available_width: config.available_width,
            },
            visual_anchor: None,
            pending_count: PendingCount::default(),
            search: SearchState::default(),
            last_char_search: None,
            modes: config.modes,
            relative_numbers: config.relative_numbers,
            vim_mode: config.vim_mode,
        }
    }

    /// Whether `mode` may currently be entered.
    pub fn mode_enabled(&self, mode: ModeKind) -> bool {
        match mode {
            ModeKind::Normal => true,
            ModeKind::Insert => self.modes.insert,
            ModeKind::Visual => self.modes.visual,
            ModeKind::VisualLine => self.modes.visual_line,
            ModeKind::Command => self.modes.command,
            ModeKind::Search => self.modes.search,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
