use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EntityError;

/// Identifier of a record within one store.
///
/// Identifiers are positive and allocated in increasing order by the store.
/// [`RecordId::NULL`] (zero) is never allocated and marks "no identity".
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// The reserved null identifier.
    pub const NULL: RecordId = RecordId(0);

    /// The first identifier a fresh store hands out.
    pub const FIRST: RecordId = RecordId(1);

    /// Wrap a raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this is the null identifier.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// The identifier immediately after this one, saturating at `u64::MAX`.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for RecordId {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EntityError::InvalidId {
                input: s.to_string(),
                reason: "expected decimal digits".into(),
            });
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|e| EntityError::InvalidId {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_zero() {
        assert!(RecordId::NULL.is_null());
        assert!(!RecordId::FIRST.is_null());
        assert_eq!(RecordId::NULL.get(), 0);
    }

    #[test]
    fn next_increments_and_saturates() {
        assert_eq!(RecordId::new(4).next(), RecordId::new(5));
        assert_eq!(RecordId::new(u64::MAX).next(), RecordId::new(u64::MAX));
    }

    #[test]
    fn parse_decimal() {
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::new(42));
        assert_eq!("0000000007".parse::<RecordId>().unwrap(), RecordId::new(7));
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert!("".parse::<RecordId>().is_err());
        assert!("-1".parse::<RecordId>().is_err());
        assert!("+1".parse::<RecordId>().is_err());
        assert!("1a".parse::<RecordId>().is_err());
    }

    #[test]
    fn parse_rejects_overflow() {
        assert!("99999999999999999999999".parse::<RecordId>().is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = RecordId::new(5);
        assert_eq!(id.to_string(), "5");
        assert_eq!(format!("{id:?}"), "RecordId(5)");
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&RecordId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RecordId::new(9));
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(RecordId::new(2) < RecordId::new(10));
    }
}
