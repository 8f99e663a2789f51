use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CodecError, CodecResult};
use crate::Codec;

/// JSON codec backed by `serde_json`.
///
/// Compact output by default. Unknown fields are ignored on decode unless
/// the target type opts into `#[serde(deny_unknown_fields)]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Compact single-line output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented, human-editable output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Whether output is indented.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> CodecResult<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        text.map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> CodecResult<T> {
        serde_json::from_str(text).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
