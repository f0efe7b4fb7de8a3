use modal_engine::{Editor, KeyCode, ModeKind, Position, Signal};

mod support;
use support::keys::{backspace, enter, esc, type_keys};

fn search_via_keys(ed: &mut Editor, pattern: &str) {
    ed.handle_key('/').unwrap();
    type_keys(ed, pattern);
    ed.handle_key(enter()).unwrap();
}

#[test]
fn search_next_wraps_around() {
    let mut ed = Editor::with_content("foo bar baz bar");
    search_via_keys(&mut ed, "bar");
    assert_eq!(ed.mode(), ModeKind::Normal);
    assert_eq!(ed.position(), Position::new(0, 4));

    ed.handle_key('n').unwrap();
    assert_eq!(ed.position(), Position::new(0, 12));

    ed.handle_key('n').unwrap();
    assert_eq!(ed.position(), Position::new(0, 4));
}

#[test]
fn search_previous_wraps_backwards() {
    let mut ed = Editor::with_content("foo bar baz bar");
    ed.search("bar");
    assert_eq!(ed.position(), Position::new(0, 4));

    ed.handle_key('N').unwrap();
    assert_eq!(ed.position(), Position::new(0, 12));

    assert!(ed.previous_search_result());
    assert_eq!(ed.position(), Position::new(0, 4));
}

#[test]
fn search_across_lines() {
    let mut ed = Editor::with_content("one\ntwo one\nthree");
    ed.search("one");
    assert_eq!(ed.position(), Position::new(1, 4));
    assert!(ed.next_search_result());
    assert_eq!(ed.position(), Position::new(0, 0));
}

#[test]
fn search_publishes_results_and_index() {
    let mut ed = Editor::with_content("foo bar baz bar");
    ed.search("bar");

    let expected = vec![Position::new(0, 4), Position::new(0, 12)];
    assert_eq!(ed.state().search.results, expected);
    assert_eq!(ed.state().search.index, Some(0));
    assert!(ed.signals().try_iter().any(|s| s == Signal::SearchResults(expected.clone())));

    ed.next_search_result();
    assert_eq!(ed.state().search.index, Some(1));
}

#[test]
fn lowercase_pattern_ignores_case() {
    let mut ed = Editor::with_content("Foo foo FOO");
    ed.search("foo");
    assert_eq!(ed.state().search.results.len(), 3);
    assert!(!ed.state().search.case_sensitive);
    assert_eq!(ed.position(), Position::new(0, 4));
}

#[test]
fn uppercase_pattern_is_case_sensitive() {
    let mut ed = Editor::with_content("Foo foo FOO");
    ed.search("FOO");
    assert!(ed.state().search.case_sensitive);
    assert_eq!(ed.state().search.results, vec![Position::new(0, 8)]);
    assert_eq!(ed.position(), Position::new(0, 8));
}

#[test]
fn no_match_leaves_cursor() {
    let mut ed = Editor::with_content("abc\ndef");
    ed.set_position(Position::new(1, 1));
    ed.search("zzz");
    assert_eq!(ed.position(), Position::new(1, 1));
    assert!(ed.state().search.results.is_empty());
    assert_eq!(ed.state().search.index, None);
    assert!(!ed.next_search_result());
}

#[test]
fn empty_pattern_clears_search() {
    let mut ed = Editor::with_content("abc abc");
    ed.search("abc");
    assert!(ed.state().search.is_active());

    ed.search("");
    assert!(!ed.state().search.is_active());
    assert!(!ed.next_search_result());
}

#[test]
fn n_without_search_does_nothing() {
    let mut ed = Editor::with_content("abc");
    assert!(ed.handle_key('n').is_ok());
    assert_eq!(ed.position(), Position::new(0, 0));
}

#[test]
fn prompt_echoes_and_edits_pattern() {
    let mut ed = Editor::with_content("bar baz");
    ed.handle_key('/').unwrap();
    assert_eq!(ed.mode(), ModeKind::Search);
    assert!(ed.signals().try_iter().any(|s| s == Signal::SearchEntered));

    type_keys(&mut ed, "bax");
    assert_eq!(ed.state().command_line, "/bax");
    ed.handle_key(backspace()).unwrap();
    ed.handle_key('z').unwrap();
    assert_eq!(ed.state().command_line, "/baz");

    ed.handle_key(enter()).unwrap();
    assert_eq!(ed.position(), Position::new(0, 4));
    assert_eq!(ed.state().command_line, "");
}

#[test]
fn escape_abandons_search() {
    let mut ed = Editor::with_content("foo bar");
    ed.handle_key('/').unwrap();
    type_keys(&mut ed, "bar");
    ed.handle_key(esc()).unwrap();
    assert_eq!(ed.mode(), ModeKind::Normal);
    assert_eq!(ed.position(), Position::new(0, 0));
    assert!(!ed.state().search.is_active());
}

#[test]
fn prompt_starts_with_last_pattern() {
    let mut ed = Editor::with_content("ab ab ab");
    ed.search("ab");
    assert_eq!(ed.position(), Position::new(0, 3));

    ed.handle_key('/').unwrap();
    assert_eq!(ed.state().command_line, "/ab");
    ed.handle_key(enter()).unwrap();
    assert_eq!(ed.position(), Position::new(0, 6));
}

#[test]
fn space_is_part_of_pattern() {
    let mut ed = Editor::with_content("a b ab");
    ed.handle_key('/').unwrap();
    ed.handle_key('a').unwrap();
    ed.handle_key(KeyCode::Space).unwrap();
    ed.handle_key('b').unwrap();
    ed.handle_key(enter()).unwrap();
    assert_eq!(ed.state().search.pattern, "a b");
}

#[test]
fn search_from_visual_extends_selection() {
    let mut ed = Editor::with_content("foo bar baz");
    ed.handle_key('v').unwrap();
    search_via_keys(&mut ed, "baz");
    assert_eq!(ed.mode(), ModeKind::Visual);
    assert_eq!(ed.state().visual_anchor, Some(Position::new(0, 0)));
    assert_eq!(ed.position(), Position::new(0, 8));

    ed.handle_key('y').unwrap();
    assert_eq!(ed.mode(), ModeKind::Normal);
}

#[test]
fn disabled_search_mode() {
    let mut ed = Editor::with_content("abc");
    ed.set_mode_enabled(ModeKind::Search, false);
    ed.handle_key('/').unwrap();
    assert_eq!(ed.mode(), ModeKind::Normal);
}
