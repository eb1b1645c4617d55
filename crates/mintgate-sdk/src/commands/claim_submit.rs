use std::path::PathBuf;

use eyre::{bail, ensure};
use mintgate_merkle::Proof;
use tracing::{info, instrument, warn};

use super::read_configuration;
use super::verify_proof::read_claim_proof;
use crate::claim_gate::{ClaimGate, ClaimOutcome, ClaimRegistry as _, FileClaimRegistry};

/// Submit a claim proof to the claim ledger.
///
/// The proof is verified once against the configured root. The identity is
/// only recorded after it verifies, and never twice. The ledger stays locked
/// from the read until the updated ledger is written, so concurrent submits
/// for one ledger are applied one at a time.
///
/// # Errors
/// Returns an error if the proof targets another root or epoch, is not
/// valid, the identity already claimed, or the ledger cannot be updated.
#[instrument(skip_all, fields(proof_file = %proof_file.display(), ledger = %ledger_file.display()))]
pub async fn submit_claim(
    proof_file: PathBuf,
    configuration_file: PathBuf,
    ledger_file: PathBuf,
) -> eyre::Result<u64> {
    let config = read_configuration(&configuration_file).await?;
    let claim = read_claim_proof(&proof_file).await?;

    ensure!(
        claim.merkle_root == config.merkle_root && claim.epoch == config.epoch,
        "Claim proof targets root {} (epoch {}) but the current root is {} (epoch {})",
        claim.merkle_root,
        claim.epoch,
        config.merkle_root,
        config.epoch
    );

    let registry = FileClaimRegistry::open_exclusive(&ledger_file).await?;
    let mut gate = ClaimGate::new(&config, registry);
    let outcome = gate.process(&claim.identity, &Proof::new(claim.proof))?;

    match outcome {
        ClaimOutcome::Minted { token_id } => {
            let registry = gate.into_registry();
            registry.save().await?;
            info!(
                identity = %claim.identity,
                token_id,
                total_claimed = registry.total_claimed(),
                "Claim accepted"
            );
            Ok(token_id)
        }
        ClaimOutcome::NotWhitelisted => {
            warn!(identity = %claim.identity, "Claim rejected: not whitelisted");
            bail!("Identity {} is not whitelisted", claim.identity)
        }
        ClaimOutcome::AlreadyClaimed => {
            warn!(identity = %claim.identity, "Claim rejected: already claimed");
            bail!("Identity {} has already claimed", claim.identity)
        }
    }
}
