//! Error types for the Flintnotes core library.

use thiserror::Error;

/// All errors that can occur within the Flintnotes core library.
#[derive(Debug, Error)]
pub enum FlintnotesError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The note store could not be created or migrated at startup.
    /// The application cannot proceed without a usable store.
    #[error("Failed to initialize note store: {0}")]
    Initialization(String),

    /// A note ID was referenced that does not exist in the database.
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    /// An import payload was not valid JSON or not a top-level array.
    #[error("Invalid import format: {0}")]
    InvalidFormat(String),

    /// Note data could not be serialized to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`FlintnotesError`].
pub type Result<T> = std::result::Result<T, FlintnotesError>;

impl FlintnotesError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::Initialization(_) => "Could not open the note database".to_string(),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::InvalidFormat(_) => {
                "The selected file is not a valid notes export".to_string()
            }
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
