//! Error types for record store operations.

use recstore_medium::MediumError;
use thiserror::Error;

/// Errors from record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required input was missing or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The logical type name cannot be embedded in an entry name.
    #[error("invalid type name {name:?}: {reason}")]
    InvalidTypeName { name: String, reason: String },

    /// Every identifier that fits the naming width has been handed out.
    #[error("record identifiers exhausted (max {max})")]
    IdsExhausted { max: u64 },

    /// The store configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Failure reported by the storage medium.
    #[error("medium error: {0}")]
    Medium(#[from] MediumError),
}

/// Result alias for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;
