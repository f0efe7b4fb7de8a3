use std::fmt;

/// A position within a text buffer.
///
/// Positions are zero-indexed and column values are counted in Unicode code
/// points, not bytes. A column may equal the line length, which addresses the
/// slot after the last character (used for appending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Zero-based line number.
    pub row: usize,
    /// Zero-based column in code points.
    pub col: usize,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

/// Orders two positions row-major so that `start <= end`.
pub fn normalize_selection(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}

/// The editing modes understood by the engine.
///
/// Vim is a modal editor where the same keys perform different
/// actions depending on the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeKind {
    /// Normal mode - for navigation and operators.
    #[default]
    Normal,
    /// Insert mode - for typing text.
    Insert,
    /// Character-wise visual selection (v).
    Visual,
    /// Line-wise visual selection (V).
    VisualLine,
    /// Colon command-line entry.
    Command,
    /// Search prompt entry.
    Search,
}

impl ModeKind {
    pub fn name(self) -> &'static str {
        match self {
            ModeKind::Normal => "normal",
            ModeKind::Insert => "insert",
            ModeKind::Visual => "visual",
            ModeKind::VisualLine => "visual-line",
            ModeKind::Command => "command",
            ModeKind::Search => "search",
        }
    }

    pub fn is_visual(self) -> bool {
        matches!(self, ModeKind::Visual | ModeKind::VisualLine)
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a position relates to the active selection, for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// Position is not selected.
    None,
    /// Position is part of a character-wise selection.
    Character,
    /// Position is part of a line-wise selection.
    Line,
}

/// A span of buffer text an operator acts on.
///
/// Character-wise ranges are half-open `[start, end)`. Line-wise ranges cover
/// the whole rows `start.row..=end.row` and ignore their columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
    pub linewise: bool,
}

impl TextRange {
    pub fn chars(start: Position, end: Position) -> Self {
        let (start, end) = normalize_selection(start, end);
        Self {
            start,
            end,
            linewise: false,
        }
    }

    pub fn lines(first: usize, last: usize) -> Self {
        let (first, last) = if first <= last { (first, last) } else { (last, first) };
        Self {
            start: Position::new(first, 0),
            end: Position::new(last, 0),
            linewise: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.linewise && self.start == self.end
    }
}
