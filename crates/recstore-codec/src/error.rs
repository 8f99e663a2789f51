use thiserror::Error;

/// Errors from encoding or decoding a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value could not be represented as text.
    #[error("encode error: {0}")]
    Encode(String),

    /// The text could not be turned into a value of the requested type.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
