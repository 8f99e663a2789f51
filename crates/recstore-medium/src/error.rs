//! Error types for storage medium operations.

use thiserror::Error;

/// Errors from storage medium operations.
#[derive(Debug, Error)]
pub enum MediumError {
    /// The requested entry does not exist at the location.
    #[error("entry not found: {location}/{name}")]
    NotFound { location: String, name: String },

    /// The entry name is not a plain file name.
    #[error("invalid entry name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The entry exists but its contents are not valid UTF-8 text.
    #[error("entry {name:?} is not valid text")]
    NotText { name: String },

    /// An internal lock was poisoned by a panicking writer.
    #[error("medium lock poisoned: {0}")]
    Poisoned(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for storage medium operations.
pub type MediumResult<T> = Result<T, MediumError>;
