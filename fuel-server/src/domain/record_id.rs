//! Store-assigned record identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of bytes in a record identifier.
const ID_LEN: usize = 12;

/// Error returned when parsing an invalid record identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid record id: {reason}")]
pub struct InvalidRecordId {
    reason: &'static str,
}

/// An opaque, globally unique record identifier.
///
/// Identifiers are 12 bytes wide and are written as 24 hexadecimal
/// characters. The leading four bytes hold the creation time in seconds,
/// so identifiers sort roughly by creation time.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::RecordId;
///
/// let id = RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
/// assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
///
/// // Uppercase hex is accepted and normalised
/// let upper = RecordId::parse("65A1F0C2E4B0A1B2C3D4E5F6").unwrap();
/// assert_eq!(id, upper);
///
/// assert!(RecordId::parse("not-an-id").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId([u8; ID_LEN]);

impl RecordId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(bson::oid::ObjectId::new().bytes())
    }

    /// Build an identifier from its raw bytes.
    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of the identifier.
    pub const fn bytes(&self) -> [u8; ID_LEN] {
        self.0
    }

    /// Parse an identifier from its 24-character hex form.
    pub fn parse(s: &str) -> Result<Self, InvalidRecordId> {
        if s.len() != ID_LEN * 2 {
            return Err(InvalidRecordId {
                reason: "must be exactly 24 characters",
            });
        }

        let mut bytes = [0u8; ID_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidRecordId {
            reason: "must contain only hexadecimal digits",
        })?;

        Ok(Self(bytes))
    }

    /// Returns true if `s` is a well-formed identifier.
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }
}

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({self})")
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_id() {
        assert!(RecordId::parse("000000000000000000000000").is_ok());
        assert!(RecordId::parse("ffffffffffffffffffffffff").is_ok());
        assert!(RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(RecordId::parse("").is_err());
        assert!(RecordId::parse("65a1f0c2").is_err());
        assert!(RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6a").is_err());
    }

    #[test]
    fn reject_non_hex() {
        assert!(RecordId::parse("not-an-id").is_err());
        assert!(RecordId::parse("65a1f0c2e4b0a1b2c3d4e5fg").is_err());
        assert!(RecordId::parse("65a1f0c2e4b0 1b2c3d4e5f6").is_err());
        assert!(!RecordId::is_valid("zzzzzzzzzzzzzzzzzzzzzzzz"));
    }

    #[test]
    fn error_display() {
        let err = RecordId::parse("abc").unwrap_err();
        assert_eq!(err.to_string(), "invalid record id: must be exactly 24 characters");
    }

    #[test]
    fn display_is_lowercase_hex() {
        let id = RecordId::parse("65A1F0C2E4B0A1B2C3D4E5F6").unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn debug() {
        let id = RecordId::from_bytes([0; 12]);
        assert_eq!(format!("{id:?}"), "RecordId(000000000000000000000000)");
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
        assert!(RecordId::is_valid(&a.to_string()));
    }

    #[test]
    fn serde_as_string() {
        let id = RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"65a1f0c2e4b0a1b2c3d4e5f6\"");

        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<RecordId>("\"nope\"").is_err());
    }
}
