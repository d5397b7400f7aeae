//! Canonical Sui identifiers
//!
//! Package ids, object ids and account addresses all share the same shape on
//! Sui: 32 bytes rendered as `0x` followed by 64 lower-case hex digits. Raw
//! values show up in many forms (`0x2`, upper-case digits, missing prefix), so
//! everything is funnelled through [`SuiAddress::normalize`] before it is
//! stored or compared.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of an address in bytes
pub const ADDRESS_LENGTH: usize = 32;

const HEX_DIGITS: usize = ADDRESS_LENGTH * 2;

/// Address parsing errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("address has {len} hex digits, at most 64 are allowed")]
    TooLong { len: usize },

    #[error("invalid hex character {ch:?} in address")]
    InvalidHex { ch: char },
}

/// A normalized 32-byte Sui address or object id
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuiAddress([u8; ADDRESS_LENGTH]);

impl SuiAddress {
    /// The Sui framework package (`0x2`)
    pub const FRAMEWORK: SuiAddress = SuiAddress::from_static("0x2");

    /// Canonicalize a raw identifier.
    ///
    /// Accepts an optional `0x` prefix, hex digits of either case and short
    /// forms, which are left-padded with zeros to the full width.
    ///
    /// # Errors
    ///
    /// Returns `AddressError` if the value is empty, longer than 64 hex digits,
    /// or contains a non-hex character.
    pub fn normalize(raw: &str) -> Result<Self, AddressError> {
        let raw = raw.trim();
        parse(raw).map(Self).map_err(|err| match err {
            AddressError::InvalidHex { .. } => AddressError::InvalidHex {
                ch: first_invalid_char(raw),
            },
            other => other,
        })
    }

    /// Compile-time variant of [`SuiAddress::normalize`] for literals.
    ///
    /// A malformed literal aborts constant evaluation, so a bad entry in a
    /// `static` table is a build failure rather than a runtime surprise.
    pub const fn from_static(raw: &'static str) -> Self {
        match parse(raw) {
            Ok(bytes) => Self(bytes),
            Err(_) => panic!("malformed Sui address literal"),
        }
    }

    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// First non-hex character after the prefix, decoded as UTF-8.
fn first_invalid_char(raw: &str) -> char {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    digits
        .chars()
        .find(|ch| !ch.is_ascii_hexdigit())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Shared by the runtime and const entry points. `InvalidHex` carries the
/// offending byte only; `normalize` replaces it with the decoded character.
const fn parse(raw: &str) -> Result<[u8; ADDRESS_LENGTH], AddressError> {
    let bytes = raw.as_bytes();
    let start = if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
        2
    } else {
        0
    };

    let digits = bytes.len() - start;
    if digits == 0 {
        return Err(AddressError::Empty);
    }
    if digits > HEX_DIGITS {
        return Err(AddressError::TooLong { len: digits });
    }

    // Walk from the least significant digit so short forms land right-aligned.
    let mut out = [0u8; ADDRESS_LENGTH];
    let mut i = 0;
    while i < digits {
        let byte = bytes[bytes.len() - 1 - i];
        let nibble = match hex_value(byte) {
            Some(value) => value,
            None => return Err(AddressError::InvalidHex { ch: byte as char }),
        };
        let index = ADDRESS_LENGTH - 1 - i / 2;
        if i % 2 == 0 {
            out[index] |= nibble;
        } else {
            out[index] |= nibble << 4;
        }
        i += 1;
    }

    Ok(out)
}

impl FromStr for SuiAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for SuiAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({self})")
    }
}

impl Serialize for SuiAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::normalize(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "0xa81a2328b7bbf70ab196d6aca400b5b0721dec7615bf272d95e0b0df04517e72";

    #[test]
    fn test_short_form_is_padded() {
        let addr = SuiAddress::normalize("0x2").unwrap();
        assert_eq!(
            addr.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
        assert_eq!(addr, SuiAddress::FRAMEWORK);
    }

    #[test]
    fn test_case_and_prefix_are_canonicalized() {
        let upper = SuiAddress::normalize(&FULL.to_uppercase().replacen("0X", "0x", 1)).unwrap();
        let bare = SuiAddress::normalize(FULL.trim_start_matches("0x")).unwrap();
        let capital_prefix = SuiAddress::normalize(&FULL.replacen("0x", "0X", 1)).unwrap();

        assert_eq!(upper.to_string(), FULL);
        assert_eq!(bare.to_string(), FULL);
        assert_eq!(capital_prefix.to_string(), FULL);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = SuiAddress::normalize("0xABC").unwrap();
        let twice = SuiAddress::normalize(&once.to_string()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(
            SuiAddress::normalize(&format!("  {FULL}\n")).unwrap().to_string(),
            FULL
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(SuiAddress::normalize(""), Err(AddressError::Empty));
        assert_eq!(SuiAddress::normalize("0x"), Err(AddressError::Empty));
    }

    #[test]
    fn test_rejects_too_long() {
        let raw = format!("{FULL}00");
        assert_eq!(
            SuiAddress::normalize(&raw),
            Err(AddressError::TooLong { len: 66 })
        );
    }

    #[test]
    fn test_rejects_placeholder_text() {
        assert!(matches!(
            SuiAddress::normalize("TODO: Fill this in..."),
            Err(AddressError::InvalidHex { .. })
        ));
        assert_eq!(
            SuiAddress::normalize("0x12g4"),
            Err(AddressError::InvalidHex { ch: 'g' })
        );
    }

    #[test]
    fn test_non_ascii_character_is_reported_intact() {
        assert_eq!(
            SuiAddress::normalize("0x12\u{e9}4"),
            Err(AddressError::InvalidHex { ch: '\u{e9}' })
        );
        assert_eq!(
            SuiAddress::normalize("ab\u{2603}"),
            Err(AddressError::InvalidHex { ch: '\u{2603}' })
        );
    }

    #[test]
    fn test_from_static_matches_runtime_normalization() {
        const ADDR: SuiAddress = SuiAddress::from_static("0xDEADbeef");
        assert_eq!(ADDR, SuiAddress::normalize("deadbeef").unwrap());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let addr = SuiAddress::normalize("0x2").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(
            json,
            "\"0x0000000000000000000000000000000000000000000000000000000000000002\""
        );

        let parsed: SuiAddress = serde_json::from_str("\"0X02\"").unwrap();
        assert_eq!(parsed, addr);
        assert!(serde_json::from_str::<SuiAddress>("\"nope\"").is_err());
    }
}
