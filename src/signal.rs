//! Outbound notifications from the editor to its host.
//!
//! Signals travel over a bounded channel. Sending never blocks the edit loop:
//! when the host falls behind and the queue is full, the new signal is dropped.

use std::fmt;

use flume::{Receiver, Sender, TrySendError};
use tracing::warn;

use crate::error::ErrorKind;
use crate::types::Position;

/// Short user-facing notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    ChangesSaved,
    RelativeNumbersEnabled,
    RelativeNumbersDisabled,
    LinesDeleted,
    Yanked,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Message::ChangesSaved => "changes saved",
            Message::RelativeNumbersEnabled => "relative line numbers enabled",
            Message::RelativeNumbersDisabled => "relative line numbers disabled",
            Message::LinesDeleted => "lines deleted",
            Message::Yanked => "selection yanked",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Signal {
    /// Text copied to the clipboard by a yank.
    Yank(String),
    /// Text inserted from the clipboard.
    Paste(String),
    /// Text removed by a delete or cut.
    Delete(String),
    /// Buffer content as it was before the undo.
    Undo(String),
    /// Buffer content as it was before the redo.
    Redo(String),
    Save {
        path: Option<String>,
        content: String,
    },
    Quit,
    Rename(String),
    DeleteFile,
    Error {
        kind: ErrorKind,
        detail: String,
    },
    Message(Message),
    CommandEntered,
    SearchEntered,
    RelativeNumbersToggled(bool),
    SearchResults(Vec<Position>),
}

/// Sending half of the signal queue.
#[derive(Debug, Clone)]
pub struct SignalSender {
    tx: Sender<Signal>,
}

impl SignalSender {
    pub fn send(&self, signal: Signal) {
        match self.tx.try_send(signal) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                warn!(signal = ?dropped, "signal queue full; dropping signal");
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

/// A bounded queue holding at most `capacity` undelivered signals.
pub fn signal_channel(capacity: usize) -> (SignalSender, Receiver<Signal>) {
    let (tx, rx) = flume::bounded(capacity.max(1));
    (SignalSender { tx }, rx)
}
