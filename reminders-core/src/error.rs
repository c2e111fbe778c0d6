//! Error types for reminders operations.

use thiserror::Error;

/// Errors that can occur in reminders operations.
#[derive(Error, Debug)]
pub enum RemindersError {
    #[error("Invalid date format: \"{0}\"")]
    InvalidDateFormat(String),

    #[error("Access to reminders was denied")]
    PermissionDenied,

    #[error("Failed to save reminder: {0}")]
    Save(String),

    #[error("Failed to format reminder: {0}")]
    Format(String),

    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Timed out after {0}s waiting for the reminders store")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for reminders operations.
pub type RemindersResult<T> = Result<T, RemindersError>;
