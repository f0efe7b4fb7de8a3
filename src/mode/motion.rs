//! Cursor motions shared by Normal and the visual modes, and the ranges they
//! cover when used after an operator.

use crate::cursor::{CharClass, char_class, word_end_from};
use crate::editor::EditorCore;
use crate::error::{EditorError, ignore_boundary};
use crate::key::{KeyCode, KeyEvent};
use crate::text_object::{CharSearch, CharSearchKind, find_char_on_line};
use crate::types::{Position, TextRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    LeftOrUp,
    RightOrDown,
    Up,
    Down,
    WordForward,
    WordEnd,
    WordBackward,
    LineStart,
    FirstNonBlank,
    LineEnd,
    BufferStart,
    /// Last line, or the counted line.
    BufferEnd,
    BlockForward,
    BlockBackward,
    PageUp,
    PageDown,
    /// Enter: down to the first non-blank, or to the counted line.
    NextLine,
}

/// How an operator treats the span a motion crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    Exclusive,
    Inclusive,
    Linewise,
}

impl Motion {
    /// Motion bound to `key` in the normal and visual modes. `0` is not
    /// included because it doubles as a count digit.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let motion = match key.code {
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Motion::LeftOrUp,
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Space | KeyCode::Char(' ') => Motion::RightOrDown,
            KeyCode::Char('j') | KeyCode::Down => Motion::Down,
            KeyCode::Char('k') | KeyCode::Up => Motion::Up,
            KeyCode::Char('w') => Motion::WordForward,
            KeyCode::Char('e') => Motion::WordEnd,
            KeyCode::Char('b') => Motion::WordBackward,
            KeyCode::Char('^') | KeyCode::Home => Motion::FirstNonBlank,
            KeyCode::Char('$') | KeyCode::End => Motion::LineEnd,
            KeyCode::Char('g') => Motion::BufferStart,
            KeyCode::Char('G') => Motion::BufferEnd,
            KeyCode::Char('{') => Motion::BlockBackward,
            KeyCode::Char('}') => Motion::BlockForward,
            KeyCode::PageUp => Motion::PageUp,
            KeyCode::PageDown => Motion::PageDown,
            KeyCode::Enter => Motion::NextLine,
            _ => return None,
        };
        Some(motion)
    }

    /// Motion bound to `key` right after an operator. Horizontal keys stay
    /// on the current line there.
    pub fn operator_target(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => Some(Motion::Left),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Space => Some(Motion::Right),
            KeyCode::Char('0') => Some(Motion::LineStart),
            _ => Motion::from_key(key),
        }
    }

    fn span(self) -> Span {
        match self {
            Motion::WordEnd | Motion::LineEnd => Span::Inclusive,
            Motion::Up
            | Motion::Down
            | Motion::BufferStart
            | Motion::BufferEnd
            | Motion::PageUp
            | Motion::PageDown
            | Motion::NextLine => Span::Linewise,
            _ => Span::Exclusive,
        }
    }
}

/// Moves the cursor by `motion`. `count` is `None` when no count was typed,
/// which matters for `G` and Enter. Boundary errors are returned after the
/// partial move has been kept.
pub fn apply_motion(core: &mut EditorCore, motion: Motion, count: Option<usize>) -> Result<(), EditorError> {
    let n = count.unwrap_or(1).max(1);
    let width = core.width();
    let page = core.state.viewport.height.max(1);
    let mut cursor = core.cursor();
    let buffer = &core.buffer;

    let result = match motion {
        Motion::Left => cursor.move_left(buffer, n, width),
        Motion::Right => cursor.move_right(buffer, n, width),
        Motion::LeftOrUp => cursor.move_left_or_up(buffer, n, width),
        Motion::RightOrDown => cursor.move_right_or_down(buffer, n, width),
        Motion::Up => cursor.move_up(buffer, n, width),
        Motion::Down => cursor.move_down(buffer, n, width),
        Motion::PageUp => cursor.move_up(buffer, n.saturating_mul(page), width),
        Motion::PageDown => cursor.move_down(buffer, n.saturating_mul(page), width),
        Motion::WordForward => cursor.move_word_forward(buffer, n, width),
        Motion::WordEnd => cursor.move_word_to_end(buffer, n, width),
        Motion::WordBackward => cursor.move_word_backward(buffer, n, width),
        Motion::BlockForward => cursor.move_block_forward(buffer, n),
        Motion::BlockBackward => cursor.move_block_backward(buffer, n),
        Motion::LineStart => {
            cursor.move_to_line_start();
            Ok(())
        }
        Motion::FirstNonBlank => {
            cursor.move_to_first_non_blank(buffer, width);
            Ok(())
        }
        Motion::LineEnd => {
            let moved = if n > 1 { cursor.move_down(buffer, n - 1, width) } else { Ok(()) };
            cursor.move_to_line_end(buffer, width);
            moved
        }
        Motion::BufferStart => {
            cursor.move_to_buffer_start();
            Ok(())
        }
        Motion::BufferEnd => {
            match count {
                Some(line) => cursor.move_to_line(buffer, line, width),
                None => cursor.move_to_buffer_end(buffer, width),
            }
            Ok(())
        }
        Motion::NextLine => match count {
            Some(line) => {
                cursor.move_to_line(buffer, line, width);
                Ok(())
            }
            None => {
                let moved = cursor.move_down(buffer, 1, width);
                if moved.is_ok() {
                    cursor.move_to_first_non_blank(buffer, width);
                }
                moved
            }
        },
    };
    core.set_cursor(cursor);
    result
}

/// The span an operator acts on when followed by `motion`.
///
/// Returns `Ok(None)` when the motion cannot move at all, e.g. `dj` on the
/// last line.
pub fn motion_range(
    core: &mut EditorCore,
    motion: Motion,
    count: Option<usize>,
    changing: bool,
) -> Result<Option<TextRange>, EditorError> {
    let origin = core.cursor();
    let start = origin.position;

    if changing && motion == Motion::WordForward && !on_blank(core, start) {
        let end = change_word_end(core, start, count.unwrap_or(1).max(1));
        return Ok(Some(TextRange::chars(start, core.inclusive_end(end))));
    }

    let moved = apply_motion(core, motion, count);
    let end = core.cursor().position;
    core.set_cursor(origin);
    ignore_boundary(moved)?;

    let range = match motion.span() {
        Span::Linewise => {
            if end.row == start.row && matches!(motion, Motion::Up | Motion::Down | Motion::PageUp | Motion::PageDown) {
                return Ok(None);
            }
            TextRange::lines(start.row, end.row)
        }
        Span::Inclusive => {
            let (from, to) = if end < start { (end, start) } else { (start, end) };
            TextRange::chars(from, inclusive_in_line(core, to))
        }
        Span::Exclusive => {
            let mut end = end;
            if motion == Motion::WordForward && end.row > start.row && end.col == first_non_blank_of(core, end.row) {
                // The last word jump only crossed a line break; stop at the end of the line before it.
                let row = end.row - 1;
                end = Position::new(row, core.buffer.line_len(row));
                if end < start {
                    end = start;
                }
            }
            TextRange::chars(start, end)
        }
    };
    Ok(Some(range))
}

fn first_non_blank_of(core: &EditorCore, row: usize) -> usize {
    crate::cursor::first_non_blank(&core.buffer, row)
}

/// Exclusive end for an inclusive motion; never extends past the line.
fn inclusive_in_line(core: &EditorCore, pos: Position) -> Position {
    let len = core.buffer.line_len(pos.row);
    Position::new(pos.row, (pos.col + 1).min(len))
}

fn on_blank(core: &EditorCore, pos: Position) -> bool {
    core.buffer
        .line(pos.row)
        .and_then(|line| line.get(pos.col))
        .is_none_or(|&c| char_class(c) == CharClass::Whitespace)
}

/// Where `cw` stops: the end of the run under the cursor, then further word
/// ends for larger counts.
fn change_word_end(core: &EditorCore, start: Position, count: usize) -> Position {
    let line = core.buffer.line(start.row).unwrap_or_default();
    let class = char_class(line[start.col]);
    let mut col = start.col;
    while col + 1 < line.len() && char_class(line[col + 1]) == class {
        col += 1;
    }
    let mut end = Position::new(start.row, col);
    for _ in 1..count {
        match word_end_from(&core.buffer, end) {
            Some(next) => end = next,
            None => break,
        }
    }
    end
}

/// Runs an in-line character search from the cursor and remembers it for
/// `;` and `,`. Returns the target column.
pub fn char_search_target(
    core: &mut EditorCore,
    search: CharSearch,
    count: usize,
) -> Result<usize, EditorError> {
    let pos = core.cursor().position;
    let line = core.buffer.line(pos.row).unwrap_or_default();
    core.state.last_char_search = Some(search);
    find_char_on_line(line, pos.col, search.target, search.kind, count)
        .ok_or(EditorError::CharNotFound(search.target))
}

/// Moves onto a character search target.
pub fn char_search_motion(core: &mut EditorCore, search: CharSearch, count: usize) -> Result<(), EditorError> {
    let col = char_search_target(core, search, count)?;
    let row = core.cursor().position.row;
    core.move_cursor_to(Position::new(row, col));
    Ok(())
}

/// Repeats the last character search, reversed for `,`.
pub fn repeat_char_search(core: &mut EditorCore, reverse: bool, count: usize) -> Result<(), EditorError> {
    let Some(last) = core.state.last_char_search else {
        return Ok(());
    };
    let kind = if reverse { last.kind.reverse() } else { last.kind };
    let result = char_search_motion(core, CharSearch { kind, ..last }, count);
    core.state.last_char_search = Some(last);
    result
}

/// The span an operator covers for a character search from the cursor.
pub fn char_search_range(
    core: &mut EditorCore,
    search: CharSearch,
    count: usize,
) -> Result<Option<TextRange>, EditorError> {
    let pos = core.cursor().position;
    let target = char_search_target(core, search, count)?;
    let (from, to) = match search.kind {
        CharSearchKind::Find | CharSearchKind::Till => (pos.col, target + 1),
        CharSearchKind::FindBack | CharSearchKind::TillBack => (target, pos.col),
    };
    if to <= from {
        return Ok(None);
    }
    Ok(Some(TextRange::chars(
        Position::new(pos.row, from),
        Position::new(pos.row, to),
    )))
}
