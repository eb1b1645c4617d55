//! Fixed-width hash digest used for leaves, nodes and roots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::utils::{ParseError, PrefixedHex, parse_prefixed_hex};

/// Size of a digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// A 32-byte hash output.
///
/// Ordering is unsigned lexicographic over the bytes, which is the order
/// used to sort leaves and to arrange commutative node pairs.
#[serde_as]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Digest(#[serde_as(as = "PrefixedHex")] [u8; DIGEST_SIZE]);

impl Digest {
    /// The all-zero digest.
    pub const ZERO: Self = Self([0_u8; DIGEST_SIZE]);

    /// Create a digest from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Borrow the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Copy out the underlying bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Digest {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed_hex::<DIGEST_SIZE>(s).map(Self)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = ParseError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; DIGEST_SIZE] =
            slice.try_into().map_err(|_| ParseError::InvalidLength {
                expected: DIGEST_SIZE.saturating_mul(2),
                actual: slice.len().saturating_mul(2),
            })?;
        Ok(Self(bytes))
    }
}
