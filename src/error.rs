use thiserror::Error;

/// Failures reported by a [`Clipboard`](crate::traits::Clipboard) backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable")]
    Unavailable,
    #[error("clipboard backend failed: {0}")]
    Backend(String),
}

/// Every failure the engine can surface.
///
/// The four boundary variants are expected while moving and are treated as
/// success by counted motions; see [`EditorError::is_boundary`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("start of buffer")]
    StartOfBuffer,
    #[error("end of buffer")]
    EndOfBuffer,
    #[error("start of line")]
    StartOfLine,
    #[error("end of line")]
    EndOfLine,

    #[error("invalid position: row {row}, col {col}")]
    InvalidPosition { row: usize, col: usize },
    #[error("invalid mode")]
    InvalidMode,
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("invalid motion: {0}")]
    InvalidMotion(String),
    #[error("no pending operation")]
    NoPendingOperation,
    #[error("character '{0}' not found")]
    CharNotFound(char),
    #[error("rename expects exactly one file name")]
    RenameFailed,
    #[error("already at oldest change")]
    AlreadyAtOldestChange,
    #[error("already at newest change")]
    AlreadyAtNewestChange,
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error("paste failed: {0}")]
    PasteFailed(ClipboardError),

    #[error("unsaved changes (use q! to override)")]
    UnsavedChanges,
    #[error("no changes to save")]
    NoChangesToSave,
}

/// Stable identifier of an error, carried by [`Signal::Error`](crate::Signal::Error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    StartOfBuffer,
    EndOfBuffer,
    StartOfLine,
    EndOfLine,
    InvalidPosition,
    InvalidMode,
    InvalidCommand,
    InvalidMotion,
    NoPendingOperation,
    CharNotFound,
    RenameFailed,
    UndoFailed,
    RedoFailed,
    CopyFailed,
    PasteFailed,
    SaveFailed,
    UnsavedChanges,
    NoChangesToSave,
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::StartOfBuffer => ErrorKind::StartOfBuffer,
            EditorError::EndOfBuffer => ErrorKind::EndOfBuffer,
            EditorError::StartOfLine => ErrorKind::StartOfLine,
            EditorError::EndOfLine => ErrorKind::EndOfLine,
            EditorError::InvalidPosition { .. } => ErrorKind::InvalidPosition,
            EditorError::InvalidMode => ErrorKind::InvalidMode,
            EditorError::InvalidCommand(_) => ErrorKind::InvalidCommand,
            EditorError::InvalidMotion(_) => ErrorKind::InvalidMotion,
            EditorError::NoPendingOperation => ErrorKind::NoPendingOperation,
            EditorError::CharNotFound(_) => ErrorKind::CharNotFound,
            EditorError::RenameFailed => ErrorKind::RenameFailed,
            EditorError::AlreadyAtOldestChange => ErrorKind::UndoFailed,
            EditorError::AlreadyAtNewestChange => ErrorKind::RedoFailed,
            EditorError::Clipboard(_) => ErrorKind::CopyFailed,
            EditorError::PasteFailed(_) => ErrorKind::PasteFailed,
            EditorError::UnsavedChanges => ErrorKind::UnsavedChanges,
            EditorError::NoChangesToSave => ErrorKind::NoChangesToSave,
        }
    }

    /// Boundary errors only mean "stopped at an edge".
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            EditorError::StartOfBuffer
                | EditorError::EndOfBuffer
                | EditorError::StartOfLine
                | EditorError::EndOfLine
        )
    }
}

/// Drops boundary errors, keeping everything else.
pub(crate) fn ignore_boundary(result: Result<(), EditorError>) -> Result<(), EditorError> {
    match result {
        Err(err) if err.is_boundary() => Ok(()),
        other => other,
    }
}
