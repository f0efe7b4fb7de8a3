//! Word text objects and single-line character search.

use crate::cursor::{CharClass, char_class};

/// Inside (`i`) or around (`a`) a text object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectScope {
    Inner,
    Around,
}

/// The four in-line character searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharSearchKind {
    /// `f`: onto the next occurrence.
    Find,
    /// `F`: onto the previous occurrence.
    FindBack,
    /// `t`: just before the next occurrence.
    Till,
    /// `T`: just after the previous occurrence.
    TillBack,
}

impl CharSearchKind {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            'f' => Some(Self::Find),
            'F' => Some(Self::FindBack),
            't' => Some(Self::Till),
            'T' => Some(Self::TillBack),
            _ => None,
        }
    }

    /// The same search in the opposite direction, used by `,`.
    pub fn reverse(self) -> Self {
        match self {
            Self::Find => Self::FindBack,
            Self::FindBack => Self::Find,
            Self::Till => Self::TillBack,
            Self::TillBack => Self::Till,
        }
    }

    pub fn is_forward(self) -> bool {
        matches!(self, Self::Find | Self::Till)
    }
}

/// A remembered search for `;` and `,`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharSearch {
    pub kind: CharSearchKind,
    pub target: char,
}

/// Column reached by the `count`th occurrence of `target` from `col`.
///
/// Only `line` is scanned. Returns `None` when fewer than `count`
/// occurrences exist, or when a till search would land outside the line.
pub fn find_char_on_line(
    line: &[char],
    col: usize,
    target: char,
    kind: CharSearchKind,
    count: usize,
) -> Option<usize> {
    let count = count.max(1);
    let found = if kind.is_forward() {
        line.iter()
            .enumerate()
            .skip(col + 1)
            .filter(|&(_, &c)| c == target)
            .nth(count - 1)
            .map(|(i, _)| i)
    } else {
        line[..col.min(line.len())]
            .iter()
            .enumerate()
            .rev()
            .filter(|&(_, &c)| c == target)
            .nth(count - 1)
            .map(|(i, _)| i)
    }?;

    match kind {
        CharSearchKind::Find | CharSearchKind::FindBack => Some(found),
        CharSearchKind::Till => found.checked_sub(1),
        CharSearchKind::TillBack => (found + 1 < line.len()).then_some(found + 1),
    }
}

/// The half-open column span `[start, end)` of a word object at `col`.
///
/// Returns `None` on an empty line. A column past the end of the line is
/// treated as the last character.
pub fn word_object(line: &[char], col: usize, scope: ObjectScope) -> Option<(usize, usize)> {
    if line.is_empty() {
        return None;
    }
    let col = col.min(line.len() - 1);
    let class_at = |i: usize| char_class(line[i]);
    let is_word = |i: usize| class_at(i) == CharClass::Word;
    let is_space = |i: usize| class_at(i) == CharClass::Whitespace;
    let last = line.len() - 1;

    let (mut start, mut end) = (col, col);
    let extend_left = |start: &mut usize, pred: &dyn Fn(usize) -> bool| {
        while *start > 0 && pred(*start - 1) {
            *start -= 1;
        }
    };
    let extend_right = |end: &mut usize, pred: &dyn Fn(usize) -> bool| {
        while *end < last && pred(*end + 1) {
            *end += 1;
        }
    };

    match class_at(col) {
        CharClass::Word => {
            extend_left(&mut start, &is_word);
            extend_right(&mut end, &is_word);
            if scope == ObjectScope::Around {
                let word_end = end;
                extend_right(&mut end, &is_space);
                if end == word_end {
                    extend_left(&mut start, &is_space);
                }
            }
        }
        CharClass::Whitespace => {
            extend_left(&mut start, &is_space);
            extend_right(&mut end, &is_space);
            if scope == ObjectScope::Around {
                if end < last && is_word(end + 1) {
                    extend_right(&mut end, &is_word);
                } else if start > 0 && is_word(start - 1) {
                    extend_left(&mut start, &is_word);
                }
            }
        }
        CharClass::Punctuation => {
            if scope == ObjectScope::Around {
                extend_left(&mut start, &is_space);
                extend_right(&mut end, &is_space);
            }
        }
    }

    Some((start, end + 1))
}
