use modal_engine::{CopyKind, Editor, EditorError, ErrorKind, ModeKind, Position, Signal};

mod support;
use support::keys::type_keys;
use support::mock_clipboard::{FailingClipboard, MockClipboard, editor_with_clipboard};

#[test]
fn yy_then_p_duplicates_line() {
    let clip = MockClipboard::new();
    let mut ed = editor_with_clipboard("hello\nworld", &clip);

    type_keys(&mut ed, "yy");
    assert_eq!(clip.get(), "hello\n");
    assert_eq!(ed.content(), "hello\nworld");

    ed.handle_key('p').unwrap();
    assert_eq!(ed.content(), "hello\nhello\nworld");
    assert_eq!(ed.position(), Position::new(1, 0));
}

#[test]
fn counted_yank_lines() {
    let clip = MockClipboard::new();
    let mut ed = editor_with_clipboard("a\nb\nc", &clip);
    type_keys(&mut ed, "2yy");
    assert_eq!(clip.get(), "a\nb\n");
    assert_eq!(ed.position(), Position::new(0, 0));
}

#[test]
fn yank_word_and_paste() {
    let clip = MockClipboard::new();
    let mut ed = editor_with_clipboard("foo bar", &clip);
    type_keys(&mut ed, "yw");
    assert_eq!(clip.get(), "foo ");

    ed.handle_key('p').unwrap();
    assert_eq!(ed.content(), "foo foo bar");
    assert_eq!(ed.position(), Position::new(0, 4));
}

#[test]
fn backward_yank_moves_cursor_to_start() {
    let clip = MockClipboard::new();
    let mut ed = editor_with_clipboard("foo bar", &clip);
    ed.set_position(Position::new(0, 6));
    type_keys(&mut ed, "yb");
    assert_eq!(clip.get(), "ba");
    assert_eq!(ed.position(), Position::new(0, 4));
}

#[test]
fn yank_to_line_end_and_inner_word() {
    let clip = MockClipboard::new();
    let mut ed = editor_with_clipboard("alpha beta gamma", &clip);
    ed.set_position(Position::new(0, 6));
    type_keys(&mut ed, "y$");
    assert_eq!(clip.get(), "beta gamma");

    ed.set_position(Position::new(0, 13));
    type_keys(&mut ed, "yiw");
    assert_eq!(clip.get(), "gamma");
    assert_eq!(ed.position(), Position::new(0, 11));
}

#[test]
fn yank_emits_signal() {
    let mut ed = Editor::with_content("abc");
    type_keys(&mut ed, "yy");
    let signals: Vec<_> = ed.signals().try_iter().collect();
    assert!(signals.contains(&Signal::Yank("abc\n".into())));
}

#[test]
fn copy_without_selection_takes_current_line() {
    let clip = MockClipboard::new();
    let mut ed = editor_with_clipboard("one\ntwo", &clip);
    ed.set_position(Position::new(1, 1));

    assert_eq!(ed.copy(CopyKind::Yank).unwrap(), "two\n");
    assert_eq!(clip.get(), "two\n");

    // A cut only fills the clipboard; the delete that follows signals.
    let _ = ed.signals().try_iter().count();
    ed.copy(CopyKind::Cut).unwrap();
    assert_eq!(ed.signals().try_iter().count(), 0);
}

#[test]
fn copy_uses_active_selection() {
    let clip = MockClipboard::new();
    let mut ed = editor_with_clipboard("abcdef", &clip);
    type_keys(&mut ed, "vll");
    assert_eq!(ed.mode(), ModeKind::Visual);
    assert_eq!(ed.copy(CopyKind::Yank).unwrap(), "abc");
}

#[test]
fn paste_multiline_moves_to_end_of_insert() {
    let clip = MockClipboard::with_text("x\ny");
    let mut ed = editor_with_clipboard("ab", &clip);
    ed.set_position(Position::new(0, 1));
    ed.handle_key('p').unwrap();
    assert_eq!(ed.content(), "ax\nyb");
    assert_eq!(ed.position(), Position::new(1, 1));

    let signals: Vec<_> = ed.signals().try_iter().collect();
    assert!(signals.contains(&Signal::Paste("x\ny".into())));
}

#[test]
fn api_paste_keeps_cursor_in_viewport() {
    let clip = MockClipboard::with_text("1\n2\n3\n4\n5\n6");
    let mut ed = editor_with_clipboard("ab", &clip);
    ed.set_viewport(3, 40);
    ed.paste().unwrap();

    assert_eq!(ed.position(), Position::new(5, 1));
    let vp = ed.state().viewport;
    assert_eq!(vp.top_line, 3);
    assert!(vp.top_line <= ed.position().row && ed.position().row < vp.top_line + vp.height);
}

#[test]
fn paste_is_undoable() {
    let clip = MockClipboard::with_text("zz");
    let mut ed = editor_with_clipboard("ab", &clip);
    ed.paste().unwrap();
    assert_eq!(ed.content(), "zzab");
    ed.undo().unwrap();
    assert_eq!(ed.content(), "ab");
}

#[test]
fn failing_clipboard_reports_copy_and_paste_errors() {
    let mut ed = Editor::builder().content("abc").clipboard(FailingClipboard).build();

    let err = ed.handle_key('p').unwrap_err();
    assert!(matches!(err, EditorError::PasteFailed(_)));
    assert_eq!(ed.content(), "abc");

    ed.handle_key('y').unwrap();
    let err = ed.handle_key('y').unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CopyFailed);

    let kinds: Vec<_> = ed
        .signals()
        .try_iter()
        .filter_map(|s| match s {
            Signal::Error { kind, .. } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec![ErrorKind::PasteFailed, ErrorKind::CopyFailed]);
}

#[test]
fn swapping_clipboard_at_runtime() {
    let mut ed = Editor::with_content("abc");
    let clip = MockClipboard::with_text("new");
    ed.set_clipboard(clip.clone());
    ed.paste().unwrap();
    assert_eq!(ed.content(), "newabc");
}
