//! Canonical allowlist tree.
//!
//! Leaves are sorted by digest before any pairing, so every party that
//! hashes the same identity set gets the same root regardless of input
//! order. Levels are built by pairing adjacent nodes left to right; an
//! unpaired last node is paired with itself. Every proof therefore has
//! exactly `ceil(log2(leaf_count))` steps.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use mintgate_core::base::{Digest, Identity, Position, ProofStep};
use mintgate_core::schema::config::HashScheme;

use crate::core::{MerkleError, should_report_progress};
use crate::encoding::{leaf_hash, node_hash};
use crate::proof::Proof;

/// Binary Merkle tree over a sorted set of identity leaves.
#[derive(Debug, Clone)]
pub struct AllowlistTree {
    scheme: HashScheme,
    /// `levels[0]` is the sorted leaf level, the last level holds only the root.
    levels: Vec<Vec<Digest>>,
    /// `identities[i]` owns leaf `levels[0][i]`.
    identities: Vec<Identity>,
    positions: HashMap<Identity, usize>,
    root: Digest,
}

impl AllowlistTree {
    /// Build the tree for a set of identities.
    ///
    /// # Errors
    /// Returns [`MerkleError::EmptySet`] for an empty input and
    /// [`MerkleError::DuplicateIdentity`] if any identity repeats.
    pub fn build(scheme: HashScheme, identities: &[Identity]) -> Result<Self, MerkleError> {
        Self::build_with_progress(scheme, identities, |_, _| {})
    }

    /// Build the tree, reporting leaf hashing progress as `(processed, total)`.
    ///
    /// # Errors
    /// Same as [`AllowlistTree::build`].
    pub fn build_with_progress(
        scheme: HashScheme,
        identities: &[Identity],
        mut progress: impl FnMut(usize, usize),
    ) -> Result<Self, MerkleError> {
        if identities.is_empty() {
            return Err(MerkleError::EmptySet);
        }

        let total = identities.len();
        let mut first_seen: HashMap<Identity, usize> = HashMap::with_capacity(total);
        let mut hashed: Vec<(Digest, Identity)> = Vec::with_capacity(total);
        let mut last_pct = 0_usize;

        for (index, identity) in identities.iter().enumerate() {
            match first_seen.entry(*identity) {
                Entry::Occupied(entry) => {
                    return Err(MerkleError::DuplicateIdentity {
                        identity: *identity,
                        first: *entry.get(),
                        second: index,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
            }
            hashed.push((leaf_hash(scheme, identity), *identity));

            let processed = index.saturating_add(1);
            if should_report_progress(processed, total, &mut last_pct) {
                progress(processed, total);
            }
        }

        hashed.sort_unstable();

        let (leaves, identities): (Vec<Digest>, Vec<Identity>) = hashed.into_iter().unzip();
        let positions = identities
            .iter()
            .enumerate()
            .map(|(index, identity)| (*identity, index))
            .collect();

        let mut levels = vec![leaves];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let parents = parent_level(scheme, level);
            levels.push(parents);
        }

        let root = levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .ok_or(MerkleError::Unexpected("tree must contain a root"))?;

        Ok(Self {
            scheme,
            levels,
            identities,
            positions,
            root,
        })
    }

    /// Root digest to publish.
    #[must_use]
    pub const fn root(&self) -> Digest {
        self.root
    }

    /// Hash function the tree was built with.
    #[must_use]
    pub const fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Number of leaves (identities).
    #[must_use]
    pub const fn leaf_count(&self) -> usize {
        self.identities.len()
    }

    /// Number of levels above the leaves, which is the length of every proof.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Leaf digests in sorted order.
    #[must_use]
    pub fn leaves(&self) -> &[Digest] {
        self.levels.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the identity is a member.
    #[must_use]
    pub fn contains(&self, identity: &Identity) -> bool {
        self.positions.contains_key(identity)
    }

    /// Leaf digest of a member identity.
    #[must_use]
    pub fn leaf_of(&self, identity: &Identity) -> Option<Digest> {
        self.positions
            .get(identity)
            .and_then(|index| self.leaves().get(*index))
            .copied()
    }

    /// `(identity, leaf)` pairs in sorted-leaf order.
    pub fn entries(&self) -> impl Iterator<Item = (Identity, Digest)> + '_ {
        self.identities
            .iter()
            .copied()
            .zip(self.leaves().iter().copied())
    }

    /// Membership proof for an identity.
    ///
    /// # Errors
    /// Returns [`MerkleError::NotAMember`] if the identity is not in the tree.
    pub fn proof_for(&self, identity: &Identity) -> Result<Proof, MerkleError> {
        let index = self
            .positions
            .get(identity)
            .copied()
            .ok_or(MerkleError::NotAMember(*identity))?;
        self.proof_at(index)
    }

    /// Membership proof for the leaf at a sorted position.
    ///
    /// # Errors
    /// Returns [`MerkleError::LeafIndexOutOfBounds`] if `leaf_index` is not a leaf.
    pub fn proof_at(&self, leaf_index: usize) -> Result<Proof, MerkleError> {
        let leaf_count = self.leaf_count();
        if leaf_index >= leaf_count {
            return Err(MerkleError::LeafIndexOutOfBounds {
                index: leaf_index,
                leaf_count,
            });
        }

        let mut steps = Vec::with_capacity(self.depth());
        let mut index = leaf_index;
        for level in self.levels.iter().take(self.depth()) {
            let (sibling_index, position) = if index.is_multiple_of(2) {
                (index.saturating_add(1), Position::Right)
            } else {
                (index.saturating_sub(1), Position::Left)
            };
            // An unpaired last node is its own sibling.
            let sibling = level
                .get(sibling_index)
                .or_else(|| level.get(index))
                .copied()
                .ok_or(MerkleError::Unexpected("proof walk left the tree"))?;
            steps.push(ProofStep::new(sibling, position));
            index = index.div_euclid(2);
        }

        Ok(Proof::new(steps))
    }
}

fn parent_level(scheme: HashScheme, level: &[Digest]) -> Vec<Digest> {
    level
        .chunks(2)
        .filter_map(|pair| {
            let left = pair.first()?;
            let right = pair.get(1).unwrap_or(left);
            Some(node_hash(scheme, left, right))
        })
        .collect()
}
