use std::path::{Path, PathBuf};

use eyre::{Context as _, bail};
use mintgate_core::schema::claim::ClaimProof;
use mintgate_core::schema::config::AllowlistConfiguration;
use mintgate_merkle::encoding::leaf_hash;
use mintgate_merkle::{Proof, ProofVerifier};
use tracing::{info, instrument, warn};

use super::read_configuration;

/// Reasons a claim proof is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofRejection {
    /// The proof was built for another hash scheme.
    SchemeMismatch,
    /// The proof was built for another epoch.
    EpochMismatch,
    /// The proof targets another root.
    RootMismatch,
    /// The stored leaf is not the leaf of the stored identity.
    LeafMismatch,
    /// The proof length differs from the tree depth.
    DepthMismatch,
    /// The flat EVM sibling list disagrees with the proof steps.
    EvmProofMismatch,
    /// The proof does not reproduce the root.
    InvalidProof,
}

/// Check a claim proof against a configuration without touching the filesystem.
///
/// Returns the first failed check, or `None` if the proof is valid.
#[must_use]
pub fn check_claim_proof(
    claim: &ClaimProof,
    config: &AllowlistConfiguration,
) -> Option<ProofRejection> {
    if claim.hash_scheme != config.hash_scheme {
        return Some(ProofRejection::SchemeMismatch);
    }
    if claim.epoch != config.epoch {
        return Some(ProofRejection::EpochMismatch);
    }
    if claim.merkle_root != config.merkle_root {
        return Some(ProofRejection::RootMismatch);
    }
    if claim.leaf != leaf_hash(config.hash_scheme, &claim.identity) {
        return Some(ProofRejection::LeafMismatch);
    }
    if claim.proof.len() != config.depth {
        return Some(ProofRejection::DepthMismatch);
    }
    if !claim.evm_proof_matches() {
        return Some(ProofRejection::EvmProofMismatch);
    }

    let proof = Proof::new(claim.proof.clone());
    let verifier = ProofVerifier::new(config.hash_scheme);
    if verifier.verify(&config.merkle_root, &claim.leaf, &proof) {
        None
    } else {
        Some(ProofRejection::InvalidProof)
    }
}

/// Read a claim proof file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub(super) async fn read_claim_proof(path: &Path) -> eyre::Result<ClaimProof> {
    info!(file = ?path, "Loading claim proof");
    serde_json::from_str(
        &tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read claim proof {}", path.display()))?,
    )
    .context("Failed to parse claim proof JSON")
}

/// Verify a claim proof file against the published configuration.
///
/// # Errors
/// Returns an error if the files cannot be read or the proof is rejected.
#[instrument(skip_all, fields(proof_file = %proof_file.display()))]
pub async fn verify_claim_proof(
    proof_file: PathBuf,
    configuration_file: PathBuf,
) -> eyre::Result<()> {
    let config = read_configuration(&configuration_file).await?;
    let claim = read_claim_proof(&proof_file).await?;

    match check_claim_proof(&claim, &config) {
        None => {
            info!(
                identity = %claim.identity,
                root = %config.merkle_root,
                epoch = config.epoch,
                "Claim proof is valid"
            );
            Ok(())
        }
        Some(rejection) => {
            warn!(identity = %claim.identity, ?rejection, "Claim proof rejected");
            bail!("Claim proof for {} rejected: {rejection:?}", claim.identity)
        }
    }
}
