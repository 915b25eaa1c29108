//! Error types for readlog
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in readlog
#[derive(Debug, Error)]
pub enum ReadlogError {
    /// No book with this id exists in the store
    #[error("Book not found: {0}")]
    NotFound(i64),

    /// User input that could not be turned into a valid value
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Connectivity loss or constraint violation at the store
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Standard input reached end of file while a prompt was waiting
    #[error("Input closed")]
    InputClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReadlogError {
    /// Build a validation error from anything printable.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the session can report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReadlogError::NotFound(_) | ReadlogError::Validation(_) | ReadlogError::Store(_)
        )
    }
}

/// Result type alias for readlog operations
pub type Result<T> = std::result::Result<T, ReadlogError>;
