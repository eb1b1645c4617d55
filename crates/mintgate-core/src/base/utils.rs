//! Hex parsing and serde helpers for fixed-width byte values.

use serde::Deserialize as _;
use thiserror::Error;

/// Errors produced when parsing a fixed-width hex value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The value does not have the expected number of hex characters.
    #[error("Invalid length: expected {expected} hex chars, got {actual}")]
    InvalidLength {
        /// Expected number of hex characters (without `0x`).
        expected: usize,
        /// Number of hex characters found.
        actual: usize,
    },

    /// The value contains characters that are not hex digits.
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Parse an `N`-byte value from a hex string, with or without `0x` prefix.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`ParseError::InvalidLength`] if the string is not exactly `2 * N`
/// hex characters, or [`ParseError::InvalidHex`] for non-hex characters.
pub fn parse_prefixed_hex<const N: usize>(s: &str) -> Result<[u8; N], ParseError> {
    let trimmed = s.trim();
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let expected = N.saturating_mul(2);
    if cleaned.len() != expected {
        return Err(ParseError::InvalidLength {
            expected,
            actual: cleaned.len(),
        });
    }

    let mut bytes = [0_u8; N];
    hex::decode_to_slice(cleaned, &mut bytes)?;
    Ok(bytes)
}

/// A `serde_as` adapter that encodes bytes as lowercase `0x`-prefixed hex.
///
/// Deserialization accepts the value with or without the prefix.
pub struct PrefixedHex;

impl<const N: usize> serde_with::SerializeAs<[u8; N]> for PrefixedHex {
    fn serialize_as<S>(value: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }
}

impl<'de, const N: usize> serde_with::DeserializeAs<'de, [u8; N]> for PrefixedHex {
    fn deserialize_as<D>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_prefixed_hex::<N>(&s).map_err(serde::de::Error::custom)
    }
}
