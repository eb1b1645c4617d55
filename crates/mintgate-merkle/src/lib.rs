//! Allowlist Merkle tree utilities.
//!
//! [`AllowlistTree`] builds the canonical tree over a set of identities and
//! hands out membership proofs; [`ProofVerifier`] replays a proof against a
//! published root. Both share the byte layout defined in [`encoding`].

mod core;
mod dump;
pub mod encoding;
mod proof;
mod tree;
mod verifier;

pub use core::{InputField, MalformedInput, MerkleError};

pub use proof::Proof;
pub use tree::AllowlistTree;
pub use verifier::{ProofVerifier, verify};
