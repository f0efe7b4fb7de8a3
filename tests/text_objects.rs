use modal_engine::{EditorError, ModeKind, Pending, Position};

mod support;
use support::keys::{editor_at, type_keys};
use support::mock_clipboard::{MockClipboard, editor_with_clipboard};

#[test]
fn inner_word() {
    let mut ed = editor_at("foo bar baz", 0, 5);
    type_keys(&mut ed, "diw");
    assert_eq!(ed.content(), "foo  baz");
    assert_eq!(ed.position(), Position::new(0, 4));
}

#[test]
fn around_word_takes_trailing_space() {
    let mut ed = editor_at("foo bar baz", 0, 5);
    type_keys(&mut ed, "daw");
    assert_eq!(ed.content(), "foo baz");
    assert_eq!(ed.position(), Position::new(0, 4));
}

#[test]
fn around_last_word_takes_leading_space() {
    let mut ed = editor_at("foo bar", 0, 5);
    type_keys(&mut ed, "daw");
    assert_eq!(ed.content(), "foo");
    assert_eq!(ed.position(), Position::new(0, 2));
}

#[test]
fn inner_whitespace_run() {
    let mut ed = editor_at("a   b", 0, 2);
    type_keys(&mut ed, "diw");
    assert_eq!(ed.content(), "ab");
}

#[test]
fn change_inner_word() {
    let clip = MockClipboard::new();
    let mut ed = editor_with_clipboard("foo bar baz", &clip);
    ed.set_position(Position::new(0, 6));
    type_keys(&mut ed, "ciw");
    assert_eq!(ed.mode(), ModeKind::Insert);
    assert_eq!(clip.get(), "bar");
    type_keys(&mut ed, "qux");
    assert_eq!(ed.content(), "foo qux baz");
}

#[test]
fn yank_inner_word_leaves_text() {
    let clip = MockClipboard::new();
    let mut ed = editor_with_clipboard("alpha_beta gamma", &clip);
    ed.set_position(Position::new(0, 3));
    type_keys(&mut ed, "yiw");
    assert_eq!(clip.get(), "alpha_beta");
    assert_eq!(ed.content(), "alpha_beta gamma");
    assert_eq!(ed.position(), Position::new(0, 0));
}

#[test]
fn count_does_not_widen_object() {
    let mut ed = editor_at("one two three", 0, 4);
    type_keys(&mut ed, "2diw");
    assert_eq!(ed.content(), "one  three");
}

#[test]
fn word_object_on_empty_line_does_nothing() {
    let mut ed = editor_at("abc\n\ndef", 1, 0);
    type_keys(&mut ed, "daw");
    assert_eq!(ed.content(), "abc\n\ndef");
    assert_eq!(ed.pending_operation(), Pending::Idle);
}

#[test]
fn unsupported_object_is_invalid() {
    let mut ed = editor_at("f(x)", 0, 2);
    type_keys(&mut ed, "di");
    let err = ed.handle_key('(').unwrap_err();
    assert!(matches!(err, EditorError::InvalidMotion(_)));
    assert_eq!(ed.content(), "f(x)");
    assert_eq!(ed.pending_operation(), Pending::Idle);
}
