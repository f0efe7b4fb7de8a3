//! A modal, Vim-style text editing engine.
//!
//! The [`Editor`] owns a [`Buffer`], a fixed set of modes and an undo
//! history, and turns [`KeyEvent`]s into document edits. Rendering, file
//! I/O and the system clipboard belong to the host, which reads
//! [`EditorState`] and drains the [`Signal`] queue after each key.

pub mod buffer;
pub mod command;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod history;
pub mod key;
pub mod mode;
pub mod signal;
pub mod state;
pub mod text_object;
pub mod traits;
pub mod types;

pub use buffer::{Buffer, SearchOptions};
pub use command::ExCommand;
pub use config::{EditorConfig, ModeFlags};
pub use cursor::{CharClass, Cursor, char_class};
pub use editor::{CopyKind, Editor, EditorBuilder, EditorCore};
pub use error::{ClipboardError, EditorError, ErrorKind};
pub use history::{History, HistoryEntry};
pub use key::{KeyCode, KeyEvent, Modifiers};
pub use mode::{ModeHandler, Operator, Pending};
pub use signal::{Message, Signal};
pub use state::{EditorState, PendingCount, SearchState, Viewport};
pub use text_object::{CharSearch, CharSearchKind, ObjectScope};
#[cfg(feature = "clipboard")]
pub use traits::SystemClipboard;
pub use traits::{Clipboard, MemoryClipboard};
pub use types::{ModeKind, Position, SelectionKind, TextRange, normalize_selection};
