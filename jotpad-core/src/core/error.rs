//! Error types for the Jotpad core library.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur within the Jotpad core library.
#[derive(Debug, Error)]
pub enum JotpadError {
    /// A note ID was requested that does not exist in the collection.
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    /// A settings flag or value could not be interpreted.
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// The background writer of a store has shut down and no longer accepts work.
    #[error("Store closed: {0}")]
    StoreClosed(String),

    /// One or more queued writes could not be persisted.
    #[error("Could not save {}: {}", .path.display(), .message)]
    WriteFailed { path: PathBuf, message: String },

    /// A queued update panicked before producing a value; nothing was saved.
    #[error("Update abandoned: {0}")]
    UpdateAborted(String),

    /// The filesystem watcher for external changes could not be installed.
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`JotpadError`].
pub type Result<T> = std::result::Result<T, JotpadError>;

impl JotpadError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoteNotFound(id) => format!("Note {id} no longer exists"),
            Self::InvalidSetting(msg) => msg.clone(),
            Self::StoreClosed(_) => "Notes are no longer being saved".to_string(),
            Self::WriteFailed { message, .. } => format!("Failed to save: {message}"),
            Self::UpdateAborted(msg) => format!("A change could not be applied: {msg}"),
            Self::Watch(e) => format!("Could not watch data files: {e}"),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
