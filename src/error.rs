//! Error types for todo

use crate::domain::TodoId;
use thiserror::Error;

/// Main error type for the todo application
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("No todo with ID '{0}' was found")]
    NotFound(TodoId),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Usage(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("ASSERTION FAILED: {0}")]
    Consistency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl TodoError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TodoError::StorageUnavailable(_) => 2,
            TodoError::Consistency(_) => 3,
            _ => 1,
        }
    }

    /// Errors the dispatcher reports itself instead of propagating
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TodoError::NotFound(_) | TodoError::InvalidArgument(_) | TodoError::Usage(_)
        )
    }

    /// Whether the offending command's usage string should follow the message
    pub fn wants_usage(&self) -> bool {
        matches!(self, TodoError::InvalidArgument(_) | TodoError::Usage(_))
    }
}

/// Result type using TodoError
pub type Result<T> = std::result::Result<T, TodoError>;
