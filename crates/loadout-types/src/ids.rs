//! Type-safe share identifier for stored builds.
//!
//! A [`ShareId`] is a random 128-bit token (UUID v4) in its canonical
//! lowercase hyphenated 36-character form. The canonical form is the only
//! accepted textual representation: [`ShareId::parse`] rejects every other
//! shape before any storage lookup can happen, so a malformed link never
//! touches the persisted document.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Length of the canonical hyphenated textual form.
const CANONICAL_LEN: usize = 36;

/// Byte offsets of the four hyphens in the canonical form.
const HYPHEN_OFFSETS: [usize; 4] = [8, 13, 18, 23];

/// Errors produced when parsing a candidate share identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseShareIdError {
    /// The candidate is not exactly 36 characters long.
    #[error("share identifier must be {CANONICAL_LEN} characters, got {0}")]
    Length(usize),

    /// The candidate is 36 characters but not in the canonical lowercase
    /// hyphenated form.
    #[error("share identifier is not in canonical hyphenated form")]
    Malformed,
}

/// Unique identifier under which a shared build is stored.
///
/// Generated randomly at save time; collision probability is negligible at
/// 128 bits, but the store still regenerates on a detected collision.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct ShareId(pub Uuid);

impl ShareId {
    /// Create a fresh random identifier (UUID v4).
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse a candidate string in canonical form.
    ///
    /// Accepts only the lowercase hyphenated 36-character rendering
    /// (`8-4-4-4-12` hex groups). Uppercase hex, braced, URN, and
    /// non-hyphenated forms are all rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ParseShareIdError`] if the candidate does not match the
    /// canonical shape.
    pub fn parse(input: &str) -> Result<Self, ParseShareIdError> {
        if input.len() != CANONICAL_LEN {
            return Err(ParseShareIdError::Length(input.len()));
        }
        for (offset, byte) in input.bytes().enumerate() {
            let ok = if HYPHEN_OFFSETS.contains(&offset) {
                byte == b'-'
            } else {
                matches!(byte, b'0'..=b'9' | b'a'..=b'f')
            };
            if !ok {
                return Err(ParseShareIdError::Malformed);
            }
        }
        let uuid = Uuid::try_parse(input).map_err(|_err| ParseShareIdError::Malformed)?;
        Ok(Self(uuid))
    }
}

impl Default for ShareId {
    fn default() -> Self {
        Self::random()
    }
}

impl core::fmt::Display for ShareId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl core::str::FromStr for ShareId {
    type Err = ParseShareIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ShareId> for Uuid {
    fn from(id: ShareId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_distinct() {
        let a = ShareId::random();
        let b = ShareId::random();
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_canonical_form() {
        let id = ShareId::random();
        let text = id.to_string();
        assert_eq!(text.len(), CANONICAL_LEN);
        assert!(text.chars().all(|c| c == '-' || c.is_ascii_hexdigit()));
        assert!(!text.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn parse_roundtrips_canonical_form() {
        let id = ShareId::random();
        let parsed = ShareId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            ShareId::parse("not-a-valid-id"),
            Err(ParseShareIdError::Length(14))
        );
        assert_eq!(ShareId::parse(""), Err(ParseShareIdError::Length(0)));
    }

    #[test]
    fn parse_rejects_uppercase() {
        let upper = ShareId::random().to_string().to_uppercase();
        assert_eq!(ShareId::parse(&upper), Err(ParseShareIdError::Malformed));
    }

    #[test]
    fn parse_rejects_simple_form() {
        // 32 hex chars without hyphens is a valid UUID rendering, but not
        // the canonical share-link form.
        let simple = ShareId::random().into_inner().simple().to_string();
        assert!(ShareId::parse(&simple).is_err());
    }

    #[test]
    fn parse_rejects_misplaced_hyphens() {
        // Right length, hyphens shifted by one position.
        let candidate = "abcdefab-cdef-abcd-efab-cdefabcdefa-";
        assert_eq!(
            ShareId::parse(candidate),
            Err(ParseShareIdError::Malformed)
        );
    }

    #[test]
    fn parse_rejects_non_hex_characters() {
        let candidate = "zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz";
        assert_eq!(
            ShareId::parse(candidate),
            Err(ParseShareIdError::Malformed)
        );
    }

    #[test]
    fn serde_roundtrip() {
        let id = ShareId::random();
        let json = serde_json::to_string(&id).unwrap();
        let restored: ShareId = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, id);
    }
}
