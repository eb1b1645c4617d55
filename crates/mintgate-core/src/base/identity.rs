//! Allowlisted identity type.
//!
//! An identity is a 20-byte EVM-style address identifying one principal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::utils::{ParseError, PrefixedHex, parse_prefixed_hex};

/// Size of an identity in bytes.
pub const IDENTITY_SIZE: usize = 20;

/// A fixed-width identity, displayed and serialized as `0x`-prefixed hex.
#[serde_as]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Identity(#[serde_as(as = "PrefixedHex")] [u8; IDENTITY_SIZE]);

impl Identity {
    /// Create an identity from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; IDENTITY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Borrow the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; IDENTITY_SIZE] {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Identity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed_hex::<IDENTITY_SIZE>(s).map(Self)
    }
}

impl From<[u8; IDENTITY_SIZE]> for Identity {
    fn from(bytes: [u8; IDENTITY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Identity> for [u8; IDENTITY_SIZE] {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl AsRef<[u8]> for Identity {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
