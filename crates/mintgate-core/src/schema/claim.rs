//! Claim proof file exchanged between the claimant and the claim processor.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::config::HashScheme;
use crate::base::{Digest, Identity, ProofStep};

/// A membership proof for one identity, bound to the root it was built for.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ClaimProof {
    /// Allowlist epoch the proof was generated for.
    pub epoch: u64,
    /// Hash function used for leaves and nodes.
    #[serde(default)]
    pub hash_scheme: HashScheme,
    /// Root the proof reproduces.
    #[schemars(with = "String")]
    pub merkle_root: Digest,
    /// Claiming identity.
    #[schemars(with = "String")]
    pub identity: Identity,
    /// Leaf digest of `identity`.
    #[schemars(with = "String")]
    pub leaf: Digest,
    /// Sibling path from the leaf up to the root.
    pub proof: Vec<ProofStep>,
    /// Flat sibling list, as passed to an on-chain `MerkleProof.verify`.
    #[schemars(with = "Vec<String>")]
    pub evm_proof: Vec<Digest>,
}

impl ClaimProof {
    /// Whether `evm_proof` lists exactly the siblings of `proof`, in order.
    #[must_use]
    pub fn evm_proof_matches(&self) -> bool {
        self.proof.len() == self.evm_proof.len()
            && self
                .proof
                .iter()
                .zip(&self.evm_proof)
                .all(|(step, sibling)| step.sibling == *sibling)
    }
}
