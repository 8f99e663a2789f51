//! The entity wrapper: one record's decoded value and its encoded text.
//!
//! The decoded value is the source of truth. The encoded form is derived
//! from it on every read and never cached, so edits made through
//! [`Entity::decoded_mut`] show up in the next [`Entity::encoded`] call.
//! Assigning encoded text decodes it once and caches the result.
//!
//! Conversion failures never escape: an entity whose value cannot be
//! encoded, or whose assigned text cannot be decoded, becomes empty.

use recstore_codec::{Codec, CodecResult, JsonCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::id::RecordId;

/// A record held by a store, pairing a typed value with its encoded text.
#[derive(Clone, Debug)]
pub struct Entity<T, C = JsonCodec> {
    id: RecordId,
    decoded: Option<T>,
    codec: C,
}

impl<T> Entity<T, JsonCodec> {
    /// An empty JSON-encoded entity.
    pub fn new(id: RecordId) -> Self {
        Self::with_codec(id, JsonCodec::default())
    }
}

impl<T, C: Codec> Entity<T, C> {
    /// An empty entity using `codec` for its encoded form.
    pub fn with_codec(id: RecordId, codec: C) -> Self {
        Self {
            id,
            decoded: None,
            codec,
        }
    }

    /// The identifier this entity was created with.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// The codec deriving the encoded form.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The cached decoded value.
    ///
    /// Returns the same instance on every call until the next assignment.
    pub fn decoded(&self) -> Option<&T> {
        self.decoded.as_ref()
    }

    /// Mutable access to the cached decoded value.
    pub fn decoded_mut(&mut self) -> Option<&mut T> {
        self.decoded.as_mut()
    }

    /// Replace the decoded value. The encoded form follows lazily.
    pub fn set_decoded(&mut self, value: Option<T>) {
        self.decoded = value;
    }

    /// Builder form of [`set_decoded`](Self::set_decoded).
    pub fn with_decoded(mut self, value: T) -> Self {
        self.decoded = Some(value);
        self
    }

    /// Take the decoded value out, consuming the entity.
    pub fn into_decoded(self) -> Option<T> {
        self.decoded
    }

    /// Whether the entity currently holds a value.
    pub fn has_value(&self) -> bool {
        self.decoded.is_some()
    }

    /// Drop both representations.
    pub fn clear(&mut self) {
        self.decoded = None;
    }
}

impl<T, C> Entity<T, C>
where
    T: Serialize + DeserializeOwned,
    C: Codec,
{
    /// Build an entity from encoded text, as if by [`set_encoded`](Self::set_encoded).
    pub fn from_encoded(id: RecordId, codec: C, text: &str) -> Self {
        let mut entity = Self::with_codec(id, codec);
        entity.set_encoded(Some(text));
        entity
    }

    /// Encode the current value.
    ///
    /// Recomputed on every call. If encoding fails the entity is cleared
    /// and `None` is returned.
    pub fn encoded(&mut self) -> Option<String> {
        match self.try_encode() {
            Ok(text) => text,
            Err(err) => {
                debug!(id = %self.id, error = %err, "value cannot be encoded; clearing entity");
                self.clear();
                None
            }
        }
    }

    /// Assign encoded text, decoding it into a fresh cached value.
    ///
    /// `None` or undecodable text leaves the entity empty.
    pub fn set_encoded(&mut self, text: Option<&str>) {
        self.decoded = match text {
            None => None,
            Some(text) => match self.codec.decode(text) {
                Ok(value) => Some(value),
                Err(err) => {
                    debug!(id = %self.id, error = %err, "text cannot be decoded; clearing entity");
                    None
                }
            },
        };
    }

    /// Encode the current value without touching the entity.
    ///
    /// `Ok(None)` when empty. Used where the caller only holds a shared
    /// reference and decides itself what a failure means.
    pub fn try_encode(&self) -> CodecResult<Option<String>> {
        self.decoded
            .as_ref()
            .map(|value| self.codec.encode(value))
            .transpose()
    }

    /// An independent copy that shares nothing with `self`.
    ///
    /// The copy is rebuilt from the encoded form, so it owns a freshly
    /// decoded value. An unencodable value yields an empty copy.
    pub fn detached_copy(&self) -> Self {
        let text = self.try_encode().ok().flatten();
        let mut copy = Self::with_codec(self.id, self.codec.clone());
        copy.set_encoded(text.as_deref());
        copy
    }
}
