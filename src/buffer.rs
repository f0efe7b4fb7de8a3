//! The in-memory document.
//!
//! Text is stored as an ordered list of lines, each a vector of Unicode code
//! points. Line breaks are structural: no stored line ever contains one, and
//! there is always at least one (possibly empty) line.

use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::error::EditorError;
use crate::types::{Position, TextRange};

/// Options for [`Buffer::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub backwards: bool,
    /// Retry once from the opposite end of the buffer when nothing is found.
    pub wrap: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            backwards: false,
            wrap: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<Vec<char>>,
    cursor: Cursor,
    saved_content: String,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// An empty buffer: one empty line, cursor at the origin.
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            cursor: Cursor::default(),
            saved_content: String::new(),
        }
    }

    /// Builds a buffer whose saved snapshot equals `text`, so it starts unmodified.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_content(text);
        buffer.save_content();
        buffer
    }

    /// Like [`Buffer::from_text`]; invalid UTF-8 is replaced, not rejected.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&String::from_utf8_lossy(bytes))
    }

    /// Replaces the text without touching the saved snapshot.
    pub fn set_content(&mut self, text: &str) {
        self.lines = split_lines(text);
        self.set_cursor(self.cursor);
    }

    pub fn content(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(line.iter());
        }
        out
    }

    pub fn saved_content(&self) -> &str {
        &self.saved_content
    }

    pub fn save_content(&mut self) {
        self.saved_content = self.content();
    }

    pub fn is_modified(&self) -> bool {
        self.saved_content != self.content()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&[char]> {
        self.lines.get(row).map(Vec::as_slice)
    }

    pub fn line_string(&self, row: usize) -> Option<String> {
        self.line(row).map(|l| l.iter().collect())
    }

    /// Code point count of `row`; zero for rows that do not exist.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, Vec::len)
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.lines.iter().map(|l| l.iter().collect())
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Stores `cursor` after clamping it onto an existing row and column.
    pub fn set_cursor(&mut self, mut cursor: Cursor) {
        let last_row = self.lines.len().saturating_sub(1);
        cursor.position.row = cursor.position.row.min(last_row);
        cursor.position.col = cursor.position.col.min(self.line_len(cursor.position.row));
        self.cursor = cursor;
    }

    pub fn set_position(&mut self, position: Position) {
        let mut cursor = self.cursor;
        cursor.position = position;
        self.set_cursor(cursor);
    }

    fn check_position(&self, row: usize, col: usize) -> Result<(), EditorError> {
        match self.lines.get(row) {
            Some(line) if col <= line.len() => Ok(()),
            _ => Err(EditorError::InvalidPosition { row, col }),
        }
    }

    /// Inserts `text` at (`row`, `col`), splitting lines on every line break.
    ///
    /// Returns the position just past the inserted text. Nothing is modified
    /// when the position is invalid.
    pub fn insert_at(&mut self, row: usize, col: usize, text: &str) -> Result<Position, EditorError> {
        self.check_position(row, col)?;
        let mut segments = split_lines(text);

        if segments.len() == 1 {
            let inserted = segments.swap_remove(0);
            let end = col + inserted.len();
            self.lines[row].splice(col..col, inserted);
            return Ok(Position::new(row, end));
        }

        let tail = self.lines[row].split_off(col);
        let first = segments.remove(0);
        self.lines[row].extend(first);

        let end_row = row + segments.len();
        let end_col = segments.last().map_or(0, Vec::len);
        if let Some(last) = segments.last_mut() {
            last.extend(tail);
        }
        self.lines.splice(row + 1..row + 1, segments);

        Ok(Position::new(end_row, end_col))
    }

    /// Deletes `count` code points starting at (`row`, `col`), treating each
    /// line break as one code point. Deleting past the end of the buffer stops
    /// at the end. Returns the removed text.
    pub fn delete_at(&mut self, row: usize, col: usize, count: usize) -> Result<String, EditorError> {
        if count == 0 {
            return Ok(String::new());
        }
        self.check_position(row, col)?;

        let mut deleted = String::new();
        let mut remaining = count;
        let (mut end_row, mut end_col) = (row, col);
        loop {
            let line = &self.lines[end_row];
            let available = line.len() - end_col;
            if remaining <= available {
                deleted.extend(&line[end_col..end_col + remaining]);
                end_col += remaining;
                break;
            }
            deleted.extend(&line[end_col..]);
            remaining -= available;
            if end_row + 1 >= self.lines.len() {
                end_col = line.len();
                break;
            }
            deleted.push('\n');
            remaining -= 1;
            end_row += 1;
            end_col = 0;
        }

        let tail = self.lines[end_row].split_off(end_col);
        self.lines[row].truncate(col);
        self.lines[row].extend(tail);
        if end_row > row {
            self.lines.drain(row + 1..=end_row);
        }

        if self.is_empty() {
            self.cursor = Cursor::default();
        } else {
            self.set_cursor(self.cursor);
        }
        Ok(deleted)
    }

    /// Number of code points between two positions, counting line breaks.
    pub fn distance(&self, from: Position, to: Position) -> usize {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        if from.row == to.row {
            return to.col.saturating_sub(from.col);
        }
        let mut total = self.line_len(from.row).saturating_sub(from.col) + 1;
        for row in from.row + 1..to.row {
            total += self.line_len(row) + 1;
        }
        total + to.col
    }

    /// The text covered by `range`. Line-wise ranges end with a line break.
    pub fn text_in(&self, range: TextRange) -> String {
        let last_row = self.lines.len().saturating_sub(1);
        if range.linewise {
            let first = range.start.row.min(last_row);
            let last = range.end.row.min(last_row);
            let mut out = String::new();
            for line in &self.lines[first..=last] {
                out.extend(line.iter());
                out.push('\n');
            }
            return out;
        }

        let start = range.start;
        let end = range.end;
        let mut out = String::new();
        for row in start.row..=end.row.min(last_row) {
            let line = &self.lines[row];
            let from = if row == start.row { start.col.min(line.len()) } else { 0 };
            let to = if row == end.row { end.col.min(line.len()) } else { line.len() };
            if from < to {
                out.extend(&line[from..to]);
            }
            if row != end.row {
                out.push('\n');
            }
        }
        out
    }

    /// Plain substring search from `start`.
    ///
    /// Forward search only considers matches strictly after `start`, backward
    /// search only matches strictly before it. With `wrap`, a failed scan is
    /// retried once from the opposite end of the buffer.
    pub fn find(&self, pattern: &str, start: Position, options: SearchOptions) -> Option<Position> {
        if pattern.is_empty() {
            return None;
        }
        let needle = fold_pattern(pattern, options.case_sensitive);
        let cs = options.case_sensitive;

        let found = if options.backwards {
            self.scan_backward(&needle, cs, Some(start))
        } else {
            self.scan_forward(&needle, cs, Some(start))
        };
        match found {
            Some(pos) => Some(pos),
            None if options.wrap => {
                if options.backwards {
                    self.scan_backward(&needle, cs, None)
                } else {
                    self.scan_forward(&needle, cs, None)
                }
            }
            None => None,
        }
    }

    /// Every position where `pattern` starts, in row-major order.
    pub fn find_all(&self, pattern: &str, case_sensitive: bool) -> Vec<Position> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let needle = fold_pattern(pattern, case_sensitive);
        let mut out = Vec::new();
        for (row, line) in self.lines.iter().enumerate() {
            if line.len() < needle.len() {
                continue;
            }
            for col in 0..=line.len() - needle.len() {
                if matches_at(line, col, &needle, case_sensitive) {
                    out.push(Position::new(row, col));
                }
            }
        }
        out
    }

    // `after == None` scans the whole buffer from the top.
    fn scan_forward(&self, needle: &[char], cs: bool, after: Option<Position>) -> Option<Position> {
        let first_row = after.map_or(0, |p| p.row);
        for row in first_row..self.lines.len() {
            let line = &self.lines[row];
            let from = match after {
                Some(p) if p.row == row => p.col + 1,
                _ => 0,
            };
            if line.len() < needle.len() {
                continue;
            }
            for col in from..=line.len() - needle.len() {
                if matches_at(line, col, needle, cs) {
                    return Some(Position::new(row, col));
                }
            }
        }
        None
    }

    // `before == None` scans the whole buffer from the bottom.
    fn scan_backward(&self, needle: &[char], cs: bool, before: Option<Position>) -> Option<Position> {
        let last_row = match before {
            Some(p) => p.row.min(self.lines.len() - 1),
            None => self.lines.len() - 1,
        };
        for row in (0..=last_row).rev() {
            let line = &self.lines[row];
            if line.len() < needle.len() {
                continue;
            }
            let mut highest = line.len() - needle.len();
            if let Some(p) = before
                && p.row == row
            {
                if p.col == 0 {
                    continue;
                }
                highest = highest.min(p.col - 1);
            }
            for col in (0..=highest).rev() {
                if matches_at(line, col, needle, cs) {
                    return Some(Position::new(row, col));
                }
            }
        }
        None
    }
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn split_lines(text: &str) -> Vec<Vec<char>> {
    normalize_newlines(text)
        .split('\n')
        .map(|line| line.chars().collect())
        .collect()
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold_pattern(pattern: &str, case_sensitive: bool) -> Vec<char> {
    if case_sensitive {
        pattern.chars().collect()
    } else {
        pattern.chars().map(fold).collect()
    }
}

fn matches_at(line: &[char], col: usize, needle: &[char], case_sensitive: bool) -> bool {
    if col + needle.len() > line.len() {
        return false;
    }
    line[col..col + needle.len()]
        .iter()
        .zip(needle)
        .all(|(&have, &want)| if case_sensitive { have == want } else { fold(have) == want })
}
