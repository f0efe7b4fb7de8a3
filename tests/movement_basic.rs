use modal_engine::{Editor, KeyCode, Position};

mod support;
use support::keys::{editor_at, enter, type_keys};

#[test]
fn hjkl_moves() {
    let mut ed = Editor::with_content("abc\nxyz");

    ed.handle_key('l').unwrap();
    assert_eq!(ed.position(), Position::new(0, 1));

    ed.handle_key('j').unwrap();
    assert_eq!(ed.position(), Position::new(1, 1));

    ed.handle_key('h').unwrap();
    assert_eq!(ed.position(), Position::new(1, 0));

    ed.handle_key('k').unwrap();
    assert_eq!(ed.position(), Position::new(0, 0));
}

#[test]
fn arrow_keys_match_hjkl() {
    let mut ed = Editor::with_content("abc\nxyz");
    ed.handle_key(KeyCode::Right).unwrap();
    ed.handle_key(KeyCode::Down).unwrap();
    assert_eq!(ed.position(), Position::new(1, 1));
    ed.handle_key(KeyCode::Left).unwrap();
    ed.handle_key(KeyCode::Up).unwrap();
    assert_eq!(ed.position(), Position::new(0, 0));
}

#[test]
fn h_wraps_to_previous_line() {
    let mut ed = editor_at("abc\nxyz", 1, 0);
    ed.handle_key('h').unwrap();
    assert_eq!(ed.position(), Position::new(0, 2));
}

#[test]
fn zero_and_dollar() {
    let mut ed = editor_at("abcdef\nxy", 0, 3);

    ed.handle_key('0').unwrap();
    assert_eq!(ed.position(), Position::new(0, 0));

    // Onto the last character, not past it.
    ed.handle_key('$').unwrap();
    assert_eq!(ed.position(), Position::new(0, 5));
}

#[test]
fn caret_goes_to_first_non_blank() {
    let mut ed = editor_at("    indented", 0, 9);
    ed.handle_key('^').unwrap();
    assert_eq!(ed.position(), Position::new(0, 4));
}

#[test]
fn g_and_big_g() {
    let mut ed = Editor::with_content("line 1\nline 2\nline 3\n  line 4");

    ed.handle_key('G').unwrap();
    assert_eq!(ed.position(), Position::new(3, 2));

    ed.handle_key('g').unwrap();
    assert_eq!(ed.position(), Position::new(0, 0));

    type_keys(&mut ed, "3G");
    assert_eq!(ed.position(), Position::new(2, 0));
}

#[test]
fn counted_enter_jumps_to_line() {
    let mut ed = Editor::with_content("a\nb\nc\nd");
    ed.handle_key('4').unwrap();
    ed.handle_key(enter()).unwrap();
    assert_eq!(ed.position(), Position::new(3, 0));

    ed.handle_key('g').unwrap();
    ed.handle_key(enter()).unwrap();
    assert_eq!(ed.position(), Position::new(1, 0));
}

#[test]
fn counts_repeat_motions() {
    let mut ed = Editor::with_content("abcdef\n1\n2\n3\n4");
    type_keys(&mut ed, "3l");
    assert_eq!(ed.position(), Position::new(0, 3));

    // Short lines clamp to the slot after their last character.
    type_keys(&mut ed, "2j");
    assert_eq!(ed.position(), Position::new(2, 1));
    assert!(ed.state().pending_count.is_empty());
}

#[test]
fn count_is_echoed_then_cleared() {
    let mut ed = Editor::with_content("a\nb\nc\nd");
    ed.handle_key('1').unwrap();
    ed.handle_key('2').unwrap();
    assert_eq!(ed.state().command_line, "12");
    ed.handle_key('j').unwrap();
    assert_eq!(ed.state().command_line, "");
    assert_eq!(ed.position(), Position::new(3, 0));
}

#[test]
fn motions_at_edges_are_not_errors() {
    let mut ed = Editor::with_content("abc\nxyz");
    assert!(ed.handle_key('k').is_ok());
    assert_eq!(ed.position(), Position::new(0, 0));

    ed.handle_key('G').unwrap();
    assert!(ed.handle_key('j').is_ok());
    assert_eq!(ed.position().row, 1);
    assert!(ed.signals().try_iter().all(|s| !matches!(s, modal_engine::Signal::Error { .. })));
}

#[test]
fn vertical_motion_keeps_preferred_column() {
    let mut ed = editor_at("hello world\nab\nhello world", 0, 8);

    ed.handle_key('j').unwrap();
    assert_eq!(ed.position(), Position::new(1, 2));

    ed.handle_key('j').unwrap();
    assert_eq!(ed.position(), Position::new(2, 8));
}

#[test]
fn preferred_column_is_visual_within_wrapped_width() {
    let text = "abcdefghijklmnop\nx\nabcdefghijklmnop";
    let mut ed = Editor::builder().available_width(10).content(text).build();

    // Column 13 sits at offset 3 of the second wrapped segment.
    type_keys(&mut ed, "13l");
    assert_eq!(ed.position(), Position::new(0, 13));
    assert_eq!(ed.cursor().preferred, 3);

    ed.handle_key('j').unwrap();
    assert_eq!(ed.position(), Position::new(1, 1));
    ed.handle_key('j').unwrap();
    assert_eq!(ed.position(), Position::new(2, 3));
    ed.handle_key('k').unwrap();
    assert_eq!(ed.position(), Position::new(1, 1));
    ed.handle_key('k').unwrap();
    assert_eq!(ed.position(), Position::new(0, 3));
    assert_eq!(ed.cursor().preferred, 3);

    // With a wide renderer the same keys keep the logical column.
    let mut ed = Editor::with_content(text);
    type_keys(&mut ed, "13ljj");
    assert_eq!(ed.position(), Position::new(2, 13));
}

#[test]
fn word_motions() {
    let mut ed = Editor::with_content("foo bar baz");

    ed.handle_key('w').unwrap();
    assert_eq!(ed.position(), Position::new(0, 4));
    ed.handle_key('w').unwrap();
    assert_eq!(ed.position(), Position::new(0, 8));

    ed.handle_key('b').unwrap();
    assert_eq!(ed.position(), Position::new(0, 4));

    ed.handle_key('e').unwrap();
    assert_eq!(ed.position(), Position::new(0, 6));
}

#[test]
fn word_forward_crosses_lines_and_stops_at_punctuation() {
    let mut ed = Editor::with_content("foo\n  bar.baz");

    ed.handle_key('w').unwrap();
    assert_eq!(ed.position(), Position::new(1, 2));

    ed.handle_key('w').unwrap();
    assert_eq!(ed.position(), Position::new(1, 5));

    ed.handle_key('w').unwrap();
    assert_eq!(ed.position(), Position::new(1, 6));
}

#[test]
fn word_backward_crosses_lines() {
    let mut ed = editor_at("alpha beta\ngamma", 1, 0);
    ed.handle_key('b').unwrap();
    assert_eq!(ed.position(), Position::new(0, 6));
}

#[test]
fn paragraph_motions() {
    let mut ed = Editor::with_content("a\nb\n\nc\nd");

    ed.handle_key('}').unwrap();
    assert_eq!(ed.position(), Position::new(2, 0));

    ed.handle_key('{').unwrap();
    assert_eq!(ed.position(), Position::new(0, 0));
}

#[test]
fn page_motions_move_by_viewport_height() {
    let text: String = (0..30).map(|i| format!("line {i}\n")).collect();
    let mut ed = Editor::builder().content(&text).viewport(10, 80).build();

    ed.handle_key(KeyCode::PageDown).unwrap();
    assert_eq!(ed.position().row, 10);
    assert_eq!(ed.state().viewport.top_line, 1);

    ed.handle_key(KeyCode::PageUp).unwrap();
    assert_eq!(ed.position().row, 0);
    assert_eq!(ed.state().viewport.top_line, 0);
}

#[test]
fn viewport_follows_cursor() {
    let text: String = (0..50).map(|i| format!("{i}\n")).collect();
    let mut ed = Editor::builder().content(&text).viewport(5, 80).build();

    ed.handle_key('G').unwrap();
    let vp = ed.state().viewport;
    assert_eq!(ed.position().row, 50);
    assert!(vp.top_line <= 50 && 50 < vp.top_line + vp.height);

    ed.handle_key('g').unwrap();
    assert_eq!(ed.state().viewport.top_line, 0);
}

#[test]
fn find_and_repeat() {
    let mut ed = Editor::with_content("hello world");

    type_keys(&mut ed, "fo");
    assert_eq!(ed.position(), Position::new(0, 4));

    ed.handle_key(';').unwrap();
    assert_eq!(ed.position(), Position::new(0, 7));

    ed.handle_key(',').unwrap();
    assert_eq!(ed.position(), Position::new(0, 4));
}

#[test]
fn till_and_backward_searches() {
    let mut ed = Editor::with_content("hello world");

    type_keys(&mut ed, "tw");
    assert_eq!(ed.position(), Position::new(0, 5));

    ed.handle_key('$').unwrap();
    type_keys(&mut ed, "Fo");
    assert_eq!(ed.position(), Position::new(0, 7));

    type_keys(&mut ed, "Th");
    assert_eq!(ed.position(), Position::new(0, 1));
}

#[test]
fn failed_find_reports_char_not_found() {
    let mut ed = Editor::with_content("hello");
    ed.handle_key('f').unwrap();
    let err = ed.handle_key('z').unwrap_err();
    assert_eq!(err, modal_engine::EditorError::CharNotFound('z'));
    assert_eq!(ed.position(), Position::new(0, 0));
    assert_eq!(ed.pending_operation(), modal_engine::Pending::Idle);
}

#[test]
fn char_search_memory_survives_mode_switch() {
    let mut ed = Editor::with_content("a-b-c-d");
    type_keys(&mut ed, "f-");
    type_keys(&mut ed, "i");
    ed.handle_key(support::keys::esc()).unwrap();
    ed.handle_key(';').unwrap();
    assert_eq!(ed.position(), Position::new(0, 3));
}
