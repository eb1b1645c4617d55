use mintgate_core::base::{Digest, ProofStep};

/// Sibling path from a leaf up to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proof {
    steps: Vec<ProofStep>,
}

impl Proof {
    /// Create a proof from its steps, ordered leaf to root.
    #[must_use]
    pub const fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    /// Steps ordered from the leaf level upwards.
    #[must_use]
    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the proof has no steps (single-member tree).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, ProofStep> {
        self.steps.iter()
    }

    /// Sibling digests without positions, as consumed by an EVM
    /// `MerkleProof.verify` call.
    #[must_use]
    pub fn siblings(&self) -> Vec<Digest> {
        self.steps.iter().map(|step| step.sibling).collect()
    }

    /// Consume the proof into its steps.
    #[must_use]
    pub fn into_steps(self) -> Vec<ProofStep> {
        self.steps
    }
}

impl From<Vec<ProofStep>> for Proof {
    fn from(steps: Vec<ProofStep>) -> Self {
        Self::new(steps)
    }
}

impl FromIterator<ProofStep> for Proof {
    fn from_iter<I: IntoIterator<Item = ProofStep>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a ProofStep;
    type IntoIter = std::slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
