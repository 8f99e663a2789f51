//! Text codecs for recstore.
//!
//! A codec turns a typed record into the text stored in one medium entry and
//! back. The record store depends only on the [`Codec`] contract; the
//! default implementation is [`JsonCodec`].

pub mod error;
pub mod json;

pub use error::{CodecError, CodecResult};
pub use json::JsonCodec;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode typed values to text and decode them back.
///
/// Decoding is structural: text produced from one type may be decoded into
/// any other type whose fields it satisfies under the codec's own rules.
pub trait Codec: Clone + Default + Send + Sync {
    /// Encode a value to text.
    fn encode<T: Serialize>(&self, value: &T) -> CodecResult<String>;

    /// Decode text into a value.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> CodecResult<T>;

    /// Content-type suffix for entries written with this codec, without the dot.
    fn extension(&self) -> &'static str;
}
