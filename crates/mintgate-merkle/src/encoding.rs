//! Canonical byte layout fed to the hash function.
//!
//! Builders and verifiers in any process or language must agree on these
//! bytes exactly:
//!
//! - identity word: `0x00 * 12 || identity` (the 32-byte ABI word of an
//!   `address`)
//! - leaf: `H(H(identity word))`
//! - node: `H(min(a, b) || max(a, b))`, ordering bytes as unsigned integers
//!
//! With [`HashScheme::Keccak256`] leaves match OpenZeppelin's
//! `StandardMerkleTree` for the `address` type, and nodes match the
//! commutative hash used by `MerkleProof.verify`.

use mintgate_core::base::{DIGEST_SIZE, Digest, IDENTITY_SIZE, Identity};
use mintgate_core::schema::config::HashScheme;
use sha2::Digest as _;
use sha2::Sha256;
use sha3::Keccak256;

/// Width of an encoded identity word.
pub const IDENTITY_WORD_SIZE: usize = 32;

const IDENTITY_PADDING: usize = IDENTITY_WORD_SIZE - IDENTITY_SIZE;

/// Encode an identity as a left-zero-padded 32-byte word.
#[must_use]
#[allow(
    clippy::indexing_slicing,
    reason = "Word layout is fixed: 12 padding bytes followed by 20 identity bytes"
)]
pub fn encode_identity(identity: &Identity) -> [u8; IDENTITY_WORD_SIZE] {
    let mut word = [0_u8; IDENTITY_WORD_SIZE];
    word[IDENTITY_PADDING..].copy_from_slice(identity.as_bytes());
    word
}

/// Compute the leaf digest of an identity.
#[must_use]
pub fn leaf_hash(scheme: HashScheme, identity: &Identity) -> Digest {
    let inner = hash(scheme, &[&encode_identity(identity)]);
    hash(scheme, &[inner.as_bytes()])
}

/// Combine two nodes into their parent.
///
/// The pair is ordered before hashing, so `node_hash(a, b) == node_hash(b, a)`.
#[must_use]
pub fn node_hash(scheme: HashScheme, a: &Digest, b: &Digest) -> Digest {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    hash(scheme, &[low.as_bytes(), high.as_bytes()])
}

fn hash(scheme: HashScheme, parts: &[&[u8]]) -> Digest {
    let bytes: [u8; DIGEST_SIZE] = match scheme {
        HashScheme::Keccak256 => {
            let mut hasher = Keccak256::new();
            for part in parts {
                hasher.update(part);
            }
            hasher.finalize().into()
        }
        HashScheme::Sha256 => {
            let mut hasher = Sha256::new();
            for part in parts {
                hasher.update(part);
            }
            hasher.finalize().into()
        }
    };
    Digest::new(bytes)
}
