/// Which modes may be entered. Normal mode is always available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModeFlags {
    pub insert: bool,
    pub visual: bool,
    pub visual_line: bool,
    pub command: bool,
    pub search: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            insert: true,
            visual: true,
            visual_line: true,
            command: true,
            search: true,
        }
    }
}

/// Construction-time settings for an [`Editor`](crate::Editor).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Maximum number of undo snapshots; values below 1 are raised to 1.
    pub max_history: usize,
    /// Capacity of the signal queue.
    pub signal_capacity: usize,
    /// When false the editor stays in Insert mode and Escape does nothing.
    pub vim_mode: bool,
    pub relative_numbers: bool,
    pub viewport_height: usize,
    pub viewport_width: usize,
    /// Text width used for sticky-column math.
    pub available_width: usize,
    pub modes: ModeFlags,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: 1000,
            signal_capacity: 100,
            vim_mode: true,
            relative_numbers: false,
            viewport_height: 24,
            viewport_width: 80,
            available_width: 80,
            modes: ModeFlags::default(),
        }
    }
}
