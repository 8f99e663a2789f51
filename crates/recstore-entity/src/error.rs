use thiserror::Error;

/// Errors from parsing record identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// The input is not a decimal record identifier.
    #[error("invalid record id {input:?}: {reason}")]
    InvalidId { input: String, reason: String },
}

/// Result alias for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;
