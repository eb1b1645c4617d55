//! One step of a Merkle membership proof.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Digest;

/// Side on which a sibling sits relative to the running node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// The sibling is the left child of the parent.
    Left,
    /// The sibling is the right child of the parent.
    Right,
}

/// A sibling digest together with its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ProofStep {
    /// Digest of the sibling node.
    #[schemars(with = "String")]
    pub sibling: Digest,
    /// Side of the sibling.
    pub position: Position,
}

impl ProofStep {
    /// Create a new proof step.
    #[must_use]
    pub const fn new(sibling: Digest, position: Position) -> Self {
        Self { sibling, position }
    }
}
