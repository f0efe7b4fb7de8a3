//! Cursor state and every motion algorithm.
//!
//! Motions mutate the cursor in place and stop at the first boundary they
//! hit, so a counted motion that runs out of room leaves the cursor as far as
//! it got and reports the boundary error. `available_width` is the renderer's
//! text width; it only feeds the sticky preferred column.

use crate::buffer::Buffer;
use crate::error::EditorError;
use crate::types::Position;

/// Class of a code point for word motions and text objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Letters, digits and underscore.
    Word,
    Whitespace,
    Punctuation,
}

pub fn char_class(c: char) -> CharClass {
    if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else if c.is_whitespace() {
        CharClass::Whitespace
    } else {
        CharClass::Punctuation
    }
}

fn is_blank(c: char) -> bool {
    char_class(c) == CharClass::Whitespace
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor {
    pub position: Position,
    /// Sticky visual column consulted by vertical motions.
    pub preferred: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            position: Position::new(row, col),
            preferred: col,
        }
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn col(&self) -> usize {
        self.position.col
    }

    fn remember_column(&mut self, width: usize) {
        self.preferred = self.position.col % width.max(1);
    }

    pub fn move_left(&mut self, buffer: &Buffer, count: usize, width: usize) -> Result<(), EditorError> {
        let mut result = Ok(());
        for _ in 0..count {
            if self.position.col == 0 {
                result = Err(EditorError::StartOfLine);
                break;
            }
            self.position.col -= 1;
        }
        self.position.col = self.position.col.min(buffer.line_len(self.position.row));
        self.remember_column(width);
        result
    }

    /// Moves right, allowing the slot after the last character.
    pub fn move_right(&mut self, buffer: &Buffer, count: usize, width: usize) -> Result<(), EditorError> {
        let len = buffer.line_len(self.position.row);
        let mut result = Ok(());
        for _ in 0..count {
            if self.position.col >= len {
                result = Err(EditorError::EndOfLine);
                break;
            }
            self.position.col += 1;
        }
        self.remember_column(width);
        result
    }

    pub fn move_up(&mut self, buffer: &Buffer, count: usize, width: usize) -> Result<(), EditorError> {
        if self.position.row == 0 {
            return Err(EditorError::StartOfBuffer);
        }
        let steps = count.min(self.position.row);
        self.position.row -= steps;
        self.apply_preferred(buffer, width);
        if steps < count {
            return Err(EditorError::StartOfBuffer);
        }
        Ok(())
    }

    pub fn move_down(&mut self, buffer: &Buffer, count: usize, width: usize) -> Result<(), EditorError> {
        let last = buffer.line_count().saturating_sub(1);
        if self.position.row >= last {
            return Err(EditorError::EndOfBuffer);
        }
        let steps = count.min(last - self.position.row);
        self.position.row += steps;
        self.apply_preferred(buffer, width);
        if steps < count {
            return Err(EditorError::EndOfBuffer);
        }
        Ok(())
    }

    // The preferred column survives short lines untouched, so moving back
    // onto a long line restores it.
    fn apply_preferred(&mut self, buffer: &Buffer, width: usize) {
        let width = width.max(1);
        let len = buffer.line_len(self.position.row);
        let segment = self.preferred / width;
        let offset = self.preferred % width;
        let target = segment * width + offset;
        self.position.col = target.min(len);
    }

    /// Left, wrapping onto the end of the previous line at column 0.
    pub fn move_left_or_up(&mut self, buffer: &Buffer, count: usize, width: usize) -> Result<(), EditorError> {
        for _ in 0..count {
            if self.position.col > 0 {
                self.position.col = (self.position.col - 1).min(buffer.line_len(self.position.row));
            } else if self.position.row > 0 {
                self.position.row -= 1;
                self.position.col = buffer.line_len(self.position.row).saturating_sub(1);
            } else {
                self.remember_column(width);
                return Err(EditorError::StartOfBuffer);
            }
        }
        self.remember_column(width);
        Ok(())
    }

    /// Right, wrapping onto the start of the next line past the last character.
    pub fn move_right_or_down(&mut self, buffer: &Buffer, count: usize, width: usize) -> Result<(), EditorError> {
        let last = buffer.line_count().saturating_sub(1);
        for _ in 0..count {
            if self.position.col < buffer.line_len(self.position.row) {
                self.position.col += 1;
            } else if self.position.row < last {
                self.position.row += 1;
                self.position.col = 0;
            } else {
                self.remember_column(width);
                return Err(EditorError::EndOfBuffer);
            }
        }
        self.remember_column(width);
        Ok(())
    }

    pub fn move_to_line_start(&mut self) {
        self.position.col = 0;
        self.preferred = 0;
    }

    /// Onto the last character of the line (column 0 on an empty line).
    pub fn move_to_line_end(&mut self, buffer: &Buffer, width: usize) {
        self.position.col = buffer.line_len(self.position.row).saturating_sub(1);
        self.remember_column(width);
    }

    /// Past the last character, where appended text goes.
    pub fn move_to_after_line_end(&mut self, buffer: &Buffer, width: usize) {
        self.position.col = buffer.line_len(self.position.row);
        self.remember_column(width);
    }

    pub fn move_to_first_non_blank(&mut self, buffer: &Buffer, width: usize) {
        self.position.col = first_non_blank(buffer, self.position.row);
        self.remember_column(width);
    }

    pub fn move_to_buffer_start(&mut self) {
        self.position = Position::ZERO;
        self.preferred = 0;
    }

    /// To the first non-blank of the last line.
    pub fn move_to_buffer_end(&mut self, buffer: &Buffer, width: usize) {
        self.position.row = buffer.line_count().saturating_sub(1);
        self.move_to_first_non_blank(buffer, width);
    }

    /// To the first non-blank of 1-based `line`, clamped to the buffer.
    pub fn move_to_line(&mut self, buffer: &Buffer, line: usize, width: usize) {
        let last = buffer.line_count().saturating_sub(1);
        self.position.row = line.saturating_sub(1).min(last);
        self.move_to_first_non_blank(buffer, width);
    }

    /// Vim `w`: to the start of the next word or punctuation run.
    pub fn move_word_forward(&mut self, buffer: &Buffer, count: usize, width: usize) -> Result<(), EditorError> {
        let mut result = Ok(());
        for _ in 0..count {
            if let Err(err) = self.word_forward_once(buffer) {
                result = Err(err);
                break;
            }
        }
        self.remember_column(width);
        result
    }

    fn word_forward_once(&mut self, buffer: &Buffer) -> Result<(), EditorError> {
        loop {
            let line = buffer.line(self.position.row).unwrap_or_default();
            let len = line.len();

            if self.position.col >= len {
                if self.position.row + 1 >= buffer.line_count() {
                    return Err(EditorError::EndOfBuffer);
                }
                self.position.row += 1;
                self.position.col = first_non_blank(buffer, self.position.row);
                return Ok(());
            }

            let mut pos = self.position.col;
            let class = char_class(line[pos]);
            if class != CharClass::Whitespace {
                while pos < len && char_class(line[pos]) == class {
                    pos += 1;
                }
            }
            while pos < len && is_blank(line[pos]) {
                pos += 1;
            }

            if pos < len {
                self.position.col = pos;
                return Ok(());
            }
            // Ran off the line; the next pass moves to the following line.
            self.position.col = len;
        }
    }

    /// Vim `e`: onto the last character of the next word or punctuation run.
    pub fn move_word_to_end(&mut self, buffer: &Buffer, count: usize, width: usize) -> Result<(), EditorError> {
        let mut result = Ok(());
        for _ in 0..count {
            match word_end_from(buffer, self.position) {
                Some(pos) => self.position = pos,
                None => {
                    result = Err(EditorError::EndOfBuffer);
                    break;
                }
            }
        }
        self.remember_column(width);
        result
    }

    /// Vim `b`: back to the start of the previous word or punctuation run.
    pub fn move_word_backward(&mut self, buffer: &Buffer, count: usize, width: usize) -> Result<(), EditorError> {
        let mut result = Ok(());
        for _ in 0..count {
            if let Err(err) = self.word_backward_once(buffer) {
                result = Err(err);
                break;
            }
        }
        self.remember_column(width);
        result
    }

    fn word_backward_once(&mut self, buffer: &Buffer) -> Result<(), EditorError> {
        loop {
            if self.position.col == 0 {
                if self.position.row == 0 {
                    return Err(EditorError::StartOfBuffer);
                }
                self.position.row -= 1;
                let len = buffer.line_len(self.position.row);
                if len == 0 {
                    // An empty line is a word of its own.
                    self.position.col = 0;
                    return Ok(());
                }
                self.position.col = len;
            }

            let line = buffer.line(self.position.row).unwrap_or_default();
            let mut pos = self.position.col.min(line.len());
            while pos > 0 && is_blank(line[pos - 1]) {
                pos -= 1;
            }
            if pos == 0 {
                // Only blanks before us on this line, keep scanning upwards.
                self.position.col = 0;
                continue;
            }
            let class = char_class(line[pos - 1]);
            while pos > 0 && char_class(line[pos - 1]) == class {
                pos -= 1;
            }
            self.position.col = pos;
            return Ok(());
        }
    }

    /// Vim `}`: to the next blank line after the current paragraph.
    pub fn move_block_forward(&mut self, buffer: &Buffer, count: usize) -> Result<(), EditorError> {
        let last = buffer.line_count().saturating_sub(1);
        for _ in 0..count {
            if self.position.row >= last {
                self.position.col = buffer.line_len(last).saturating_sub(1);
                return Err(EditorError::EndOfBuffer);
            }
            let mut row = self.position.row + 1;
            while row < last && is_blank_line(buffer, row) {
                row += 1;
            }
            while row < last && !is_blank_line(buffer, row) {
                row += 1;
            }
            self.position.row = row;
            self.position.col = 0;
        }
        if self.position.row == last && !is_blank_line(buffer, last) {
            self.position.col = buffer.line_len(last).saturating_sub(1);
        }
        self.preferred = self.position.col;
        Ok(())
    }

    /// Vim `{`: to the previous blank line before the current paragraph.
    pub fn move_block_backward(&mut self, buffer: &Buffer, count: usize) -> Result<(), EditorError> {
        for _ in 0..count {
            if self.position.row == 0 {
                self.position.col = 0;
                return Err(EditorError::StartOfBuffer);
            }
            let mut row = self.position.row - 1;
            while row > 0 && is_blank_line(buffer, row) {
                row -= 1;
            }
            while row > 0 && !is_blank_line(buffer, row) {
                row -= 1;
            }
            self.position.row = row;
            self.position.col = 0;
        }
        self.preferred = 0;
        Ok(())
    }
}

pub fn first_non_blank(buffer: &Buffer, row: usize) -> usize {
    buffer
        .line(row)
        .and_then(|line| line.iter().position(|&c| !is_blank(c)))
        .unwrap_or(0)
}

fn is_blank_line(buffer: &Buffer, row: usize) -> bool {
    buffer
        .line(row)
        .is_none_or(|line| line.iter().all(|&c| is_blank(c)))
}

/// End of the next word run strictly after `from`, crossing lines.
pub(crate) fn word_end_from(buffer: &Buffer, from: Position) -> Option<Position> {
    let mut row = from.row;
    let mut pos = from.col + 1;
    loop {
        let line = buffer.line(row)?;
        let len = line.len();
        while pos < len && is_blank(line[pos]) {
            pos += 1;
        }
        if pos < len {
            let class = char_class(line[pos]);
            while pos < len && char_class(line[pos]) == class {
                pos += 1;
            }
            return Some(Position::new(row, pos - 1));
        }
        if row + 1 >= buffer.line_count() {
            return None;
        }
        row += 1;
        pos = 0;
    }
}
