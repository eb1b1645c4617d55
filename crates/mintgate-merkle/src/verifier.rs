use mintgate_core::base::{DIGEST_SIZE, Digest, Identity, Position, ProofStep, parse_prefixed_hex};
use mintgate_core::schema::config::HashScheme;

use crate::core::{InputField, MalformedInput, MerkleError};
use crate::encoding::{leaf_hash, node_hash};
use crate::proof::Proof;

/// Stateless membership proof verifier.
///
/// Nodes are combined with the commutative pair hash, so step positions
/// never change the result; they are carried for readers only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProofVerifier {
    scheme: HashScheme,
}

impl ProofVerifier {
    /// Create a verifier for the given hash scheme.
    #[must_use]
    pub const fn new(scheme: HashScheme) -> Self {
        Self { scheme }
    }

    /// Hash scheme used to combine nodes.
    #[must_use]
    pub const fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Fold the proof over `leaf` and return the resulting root.
    #[must_use]
    pub fn process_proof(&self, leaf: &Digest, proof: &Proof) -> Digest {
        proof
            .iter()
            .fold(*leaf, |node, step| node_hash(self.scheme, &node, &step.sibling))
    }

    /// Whether `proof` links `leaf` to `root`.
    #[must_use]
    pub fn verify(&self, root: &Digest, leaf: &Digest, proof: &Proof) -> bool {
        self.process_proof(leaf, proof) == *root
    }

    /// Whether `proof` links the leaf of `identity` to `root`.
    #[must_use]
    pub fn verify_identity(&self, root: &Digest, identity: &Identity, proof: &Proof) -> bool {
        self.verify(root, &leaf_hash(self.scheme, identity), proof)
    }

    /// Verify raw byte input.
    ///
    /// # Errors
    /// Returns [`MalformedInput::DigestWidth`] if any digest is not
    /// [`DIGEST_SIZE`] bytes wide.
    pub fn verify_bytes(
        &self,
        root: &[u8],
        leaf: &[u8],
        steps: &[(&[u8], Position)],
    ) -> Result<bool, MerkleError> {
        let root = digest_from_bytes(InputField::Root, root)?;
        let leaf = digest_from_bytes(InputField::Leaf, leaf)?;
        let proof = steps
            .iter()
            .enumerate()
            .map(|(index, (sibling, position))| {
                digest_from_bytes(InputField::Sibling(index), sibling)
                    .map(|sibling| ProofStep::new(sibling, *position))
            })
            .collect::<Result<Proof, _>>()?;
        Ok(self.verify(&root, &leaf, &proof))
    }

    /// Verify hex-encoded input, `0x` prefix optional.
    ///
    /// # Errors
    /// Returns [`MalformedInput::Encoding`] if any digest fails to decode.
    pub fn verify_hex(
        &self,
        root: &str,
        leaf: &str,
        steps: &[(&str, Position)],
    ) -> Result<bool, MerkleError> {
        let root = digest_from_hex(InputField::Root, root)?;
        let leaf = digest_from_hex(InputField::Leaf, leaf)?;
        let proof = steps
            .iter()
            .enumerate()
            .map(|(index, (sibling, position))| {
                digest_from_hex(InputField::Sibling(index), sibling)
                    .map(|sibling| ProofStep::new(sibling, *position))
            })
            .collect::<Result<Proof, _>>()?;
        Ok(self.verify(&root, &leaf, &proof))
    }
}

/// Verify with the default hash scheme.
#[must_use]
pub fn verify(root: &Digest, leaf: &Digest, proof: &Proof) -> bool {
    ProofVerifier::default().verify(root, leaf, proof)
}

fn digest_from_bytes(field: InputField, bytes: &[u8]) -> Result<Digest, MalformedInput> {
    <[u8; DIGEST_SIZE]>::try_from(bytes)
        .map(Digest::new)
        .map_err(|_| MalformedInput::DigestWidth {
            field,
            expected: DIGEST_SIZE,
            actual: bytes.len(),
        })
}

fn digest_from_hex(field: InputField, s: &str) -> Result<Digest, MalformedInput> {
    parse_prefixed_hex::<DIGEST_SIZE>(s)
        .map(Digest::new)
        .map_err(|source| MalformedInput::Encoding { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AllowlistTree;

    fn sample_tree(scheme: HashScheme) -> AllowlistTree {
        let identities: Vec<Identity> = (1..=5_u8).map(|v| Identity::new([v; 20])).collect();
        AllowlistTree::build(scheme, &identities).expect("tree should build")
    }

    const fn assert_copy_send_sync<T: Copy + Send + Sync>() {}
    const fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn verifier_is_copy_and_shareable() {
        assert_copy_send_sync::<ProofVerifier>();
        assert_send_sync::<Proof>();
    }

    #[test]
    fn members_verify_under_both_schemes() {
        for scheme in [HashScheme::Keccak256, HashScheme::Sha256] {
            let tree = sample_tree(scheme);
            let verifier = ProofVerifier::new(scheme);
            for (identity, leaf) in tree.entries() {
                let proof = tree.proof_for(&identity).expect("member should have a proof");
                assert_eq!(verifier.process_proof(&leaf, &proof), tree.root());
                assert!(verifier.verify(&tree.root(), &leaf, &proof));
                assert!(verifier.verify_identity(&tree.root(), &identity, &proof));
            }
        }
    }

    #[test]
    fn scheme_mismatch_fails() {
        let tree = sample_tree(HashScheme::Sha256);
        let identity = Identity::new([1; 20]);
        let proof = tree.proof_for(&identity).expect("member should have a proof");
        let verifier = ProofVerifier::new(HashScheme::Keccak256);
        assert!(!verifier.verify_identity(&tree.root(), &identity, &proof));
    }

    #[test]
    fn positions_do_not_affect_result() {
        let tree = sample_tree(HashScheme::Keccak256);
        let identity = Identity::new([3; 20]);
        let proof = tree.proof_for(&identity).expect("member should have a proof");
        let flipped: Proof = proof
            .iter()
            .map(|step| {
                let position = match step.position {
                    Position::Left => Position::Right,
                    Position::Right => Position::Left,
                };
                ProofStep::new(step.sibling, position)
            })
            .collect();
        assert!(verify(&tree.root(), &leaf_hash(HashScheme::Keccak256, &identity), &flipped));
    }

    #[test]
    fn empty_proof_checks_leaf_equals_root() {
        let leaf = Digest::new([9; DIGEST_SIZE]);
        assert!(verify(&leaf, &leaf, &Proof::default()));
        assert!(!verify(&Digest::ZERO, &leaf, &Proof::default()));
    }

    #[test]
    fn verify_bytes_rejects_bad_width() {
        let verifier = ProofVerifier::default();
        let root = [0_u8; DIGEST_SIZE];
        let short = [0_u8; 31];
        let err = verifier
            .verify_bytes(&root, &short, &[])
            .expect_err("short leaf must fail");
        assert_eq!(
            err,
            MerkleError::MalformedInput(MalformedInput::DigestWidth {
                field: InputField::Leaf,
                expected: DIGEST_SIZE,
                actual: 31,
            })
        );

        let long = [0_u8; 33];
        let err = verifier
            .verify_bytes(&root, &root, &[(long.as_slice(), Position::Left)])
            .expect_err("long sibling must fail");
        assert!(matches!(
            err,
            MerkleError::MalformedInput(MalformedInput::DigestWidth {
                field: InputField::Sibling(0),
                actual: 33,
                ..
            })
        ));
    }

    #[test]
    fn verify_hex_accepts_members_and_rejects_garbage() {
        let tree = sample_tree(HashScheme::Keccak256);
        let identity = Identity::new([2; 20]);
        let leaf = tree.leaf_of(&identity).expect("member has a leaf");
        let proof = tree.proof_for(&identity).expect("member should have a proof");
        let siblings: Vec<(String, Position)> = proof
            .iter()
            .map(|step| (step.sibling.to_string(), step.position))
            .collect();
        let borrowed: Vec<(&str, Position)> = siblings
            .iter()
            .map(|(sibling, position)| (sibling.as_str(), *position))
            .collect();

        let verifier = ProofVerifier::default();
        let root = tree.root().to_string();
        assert!(
            verifier
                .verify_hex(&root, &leaf.to_string(), &borrowed)
                .expect("input is well formed")
        );

        let err = verifier
            .verify_hex("0xzz", &leaf.to_string(), &borrowed)
            .expect_err("bad root must fail");
        assert!(matches!(
            err,
            MerkleError::MalformedInput(MalformedInput::Encoding {
                field: InputField::Root,
                ..
            })
        ));
    }
}
