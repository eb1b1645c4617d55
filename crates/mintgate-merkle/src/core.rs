//! Shared error types and helpers.

use std::fmt;

use mintgate_core::base::{Digest, Identity, ParseError};
use thiserror::Error;

/// Errors that can occur when building trees, extracting proofs or
/// decoding verifier input.
///
/// A proof that simply does not verify is not an error; see
/// [`crate::ProofVerifier::verify`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MerkleError {
    /// The identity set is empty.
    #[error("Identity set is empty")]
    EmptySet,

    /// The same identity occurs more than once in the input.
    #[error("Duplicate identity {identity} at input indices {first} and {second}")]
    DuplicateIdentity {
        /// The repeated identity.
        identity: Identity,
        /// Index of its first occurrence.
        first: usize,
        /// Index of the repeated occurrence.
        second: usize,
    },

    /// The identity is not part of the tree.
    #[error("Identity {0} is not a member of the allowlist")]
    NotAMember(Identity),

    /// The leaf index is outside the tree.
    #[error("Leaf index {index} is out of bounds for tree with {leaf_count} leaves")]
    LeafIndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },

    /// Verifier input has the wrong width or cannot be decoded.
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] MalformedInput),

    /// The tree dump carries an unknown format tag.
    #[error("Unsupported tree dump format '{0}'")]
    UnsupportedDumpFormat(String),

    /// A tree dump entry's leaf does not match its identity.
    #[error("Tree dump leaf for identity {0} does not match its encoding")]
    DumpLeafMismatch(Identity),

    /// A tree dump's stored root does not match the rebuilt tree.
    #[error("Tree dump root mismatch: stored {stored}, rebuilt {rebuilt}")]
    DumpRootMismatch {
        /// Root stored in the dump.
        stored: Digest,
        /// Root recomputed from the entries.
        rebuilt: Digest,
    },

    /// Unexpected error.
    #[error("Unexpected error: {0}")]
    Unexpected(&'static str),
}

/// Field of verifier input that failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// The expected root.
    Root,
    /// The claimed leaf.
    Leaf,
    /// The sibling of the proof step at the given index.
    Sibling(usize),
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Leaf => f.write_str("leaf"),
            Self::Sibling(index) => write!(f, "sibling at step {index}"),
        }
    }
}

/// Reasons verifier input is rejected before any hashing happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedInput {
    /// A digest does not have the expected width.
    #[error("{field} must be {expected} bytes, got {actual}")]
    DigestWidth {
        /// Offending field.
        field: InputField,
        /// Expected width in bytes.
        expected: usize,
        /// Actual width in bytes.
        actual: usize,
    },

    /// A digest is not valid hex.
    #[error("{field} is not a valid digest: {source}")]
    Encoding {
        /// Offending field.
        field: InputField,
        /// Underlying parse failure.
        source: ParseError,
    },
}

/// Whether progress should be reported. Fires at every 10% step.
pub const fn should_report_progress(current: usize, total: usize, last_pct: &mut usize) -> bool {
    if total == 0 {
        return false;
    }
    let pct = current.saturating_mul(100).saturating_div(total);
    if pct >= last_pct.saturating_add(10) {
        *last_pct = pct;
        true
    } else {
        false
    }
}
