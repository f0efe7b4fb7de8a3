use modal_engine::{Buffer, Editor, KeyCode, KeyEvent, ModeKind};
use proptest::prelude::*;
use ropey::Rope;

// Only `\n` breaks lines here so the rope and the buffer agree on rows.
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z ]{0,40}",
        "[a-zA-Z0-9 .,;_\n]{0,160}",
        r"[a-z ]{0,20}\n\n[a-z ]{0,20}",
        "[a-z\u{e9}\u{4e16}\u{754c} \n]{0,60}",
    ]
}

#[derive(Debug, Clone)]
enum Edit {
    Insert { row: usize, col: usize, text: String },
    Delete { row: usize, col: usize, count: usize },
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (any::<usize>(), any::<usize>(), "[a-z\n]{0,6}")
            .prop_map(|(row, col, text)| Edit::Insert { row, col, text }),
        (any::<usize>(), any::<usize>(), 0usize..12)
            .prop_map(|(row, col, count)| Edit::Delete { row, col, count }),
    ]
}

fn key_strategy() -> impl Strategy<Value = KeyEvent> {
    let chars = "hjklwbeg0G${}^fFtT;,xXdDcCyYpPuUiIaAoOvV/:n123 qr".chars();
    let mut keys: Vec<KeyEvent> = chars.map(KeyEvent::char).collect();
    keys.extend(
        [
            KeyCode::Esc,
            KeyCode::Esc,
            KeyCode::Enter,
            KeyCode::Backspace,
            KeyCode::Delete,
            KeyCode::Left,
            KeyCode::Down,
            KeyCode::PageDown,
        ]
        .map(KeyEvent::new),
    );
    prop::sample::select(keys)
}

/// Resolves seeds to an in-bounds insertion point.
fn pick(buf: &Buffer, row: usize, col: usize) -> (usize, usize) {
    let row = row % buf.line_count();
    let col = col % (buf.line_len(row) + 1);
    (row, col)
}

fn assert_cursor_in_bounds(ed: &Editor) {
    let pos = ed.position();
    let buf = ed.buffer();
    assert!(pos.row < buf.line_count(), "row {} of {}", pos.row, buf.line_count());
    assert!(pos.col <= buf.line_len(pos.row), "col {} past line end", pos.col);
}

proptest! {
    #[test]
    fn buffer_edits_match_rope(text in text_strategy(), edits in prop::collection::vec(edit_strategy(), 0..24)) {
        let mut buf = Buffer::from_text(&text);
        let mut rope = Rope::from_str(&text);

        for edit in edits {
            match edit {
                Edit::Insert { row, col, text } => {
                    let (row, col) = pick(&buf, row, col);
                    let idx = rope.line_to_char(row) + col;
                    buf.insert_at(row, col, &text).unwrap();
                    rope.insert(idx, &text);
                }
                Edit::Delete { row, col, count } => {
                    let (row, col) = pick(&buf, row, col);
                    let idx = rope.line_to_char(row) + col;
                    let end = (idx + count).min(rope.len_chars());
                    let expected = rope.slice(idx..end).to_string();
                    let deleted = buf.delete_at(row, col, count).unwrap();
                    prop_assert_eq!(deleted, expected);
                    rope.remove(idx..end);
                }
            }
            prop_assert_eq!(buf.content(), rope.to_string());
            prop_assert_eq!(buf.line_count(), rope.len_lines());
            prop_assert!(buf.line_count() >= 1);
        }
    }

    #[test]
    fn distance_matches_char_offsets(text in text_strategy(), a in any::<(usize, usize)>(), b in any::<(usize, usize)>()) {
        let buf = Buffer::from_text(&text);
        let rope = Rope::from_str(&text);
        let (ar, ac) = pick(&buf, a.0, a.1);
        let (br, bc) = pick(&buf, b.0, b.1);
        let ia = rope.line_to_char(ar) + ac;
        let ib = rope.line_to_char(br) + bc;
        let d = buf.distance(
            modal_engine::Position::new(ar, ac),
            modal_engine::Position::new(br, bc),
        );
        prop_assert_eq!(d, ia.abs_diff(ib));
    }

    #[test]
    fn keys_never_leave_cursor_out_of_bounds(text in text_strategy(), keys in prop::collection::vec(key_strategy(), 0..60)) {
        let mut ed = Editor::with_content(&text);
        for key in keys {
            let _ = ed.handle_key(key);
            assert_cursor_in_bounds(&ed);
            prop_assert!(ed.buffer().line_count() >= 1);
            let top = ed.state().viewport.top_line;
            let row = ed.position().row;
            prop_assert!(top <= row && row < top + ed.state().viewport.height);
        }
    }

    #[test]
    fn undo_everything_restores_original(text in text_strategy(), keys in prop::collection::vec(key_strategy(), 0..60)) {
        let mut ed = Editor::with_content(&text);
        for key in keys {
            let _ = ed.handle_key(key);
        }
        ed.switch_mode(ModeKind::Normal);
        while ed.undo().is_ok() {}
        prop_assert_eq!(ed.content(), text);
    }

    #[test]
    fn counted_motions_stay_in_bounds(text in text_strategy(), count in 1usize..500, motion in prop::sample::select(vec!['h', 'j', 'k', 'l', 'w', 'b', 'e', '}', '{', '$', 'G'])) {
        let mut ed = Editor::with_content(&text);
        for digit in count.to_string().chars() {
            ed.handle_key(digit).unwrap();
        }
        prop_assert!(ed.handle_key(motion).is_ok());
        assert_cursor_in_bounds(&ed);
    }
}
