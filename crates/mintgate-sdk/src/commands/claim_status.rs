use std::path::PathBuf;

use mintgate_core::base::Identity;
use tracing::{info, instrument};

use super::claim_proof::{MembershipSource, load_allowlist_tree};
use super::read_configuration;
use crate::claim_gate::{ClaimRegistry as _, FileClaimRegistry};

/// Eligibility and claim state of one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimStatus {
    /// Whether the identity is in the current allowlist.
    pub eligible: bool,
    /// Whether the identity has already claimed.
    pub claimed: bool,
    /// Number of claims accepted so far.
    pub total_claimed: u64,
}

/// Report whether `identity` is eligible and whether it already claimed.
///
/// # Errors
/// Returns an error if the allowlist does not reproduce the configured root
/// or the ledger cannot be read.
#[instrument(skip_all, fields(identity = %identity))]
pub async fn claim_status(
    identity: Identity,
    identities_file: PathBuf,
    ledger_file: PathBuf,
    configuration_file: PathBuf,
) -> eyre::Result<ClaimStatus> {
    let config = read_configuration(&configuration_file).await?;
    let tree = load_allowlist_tree(&config, MembershipSource::Identities(identities_file)).await?;
    let registry = FileClaimRegistry::open(&ledger_file).await?;

    let status = ClaimStatus {
        eligible: tree.contains(&identity),
        claimed: registry.is_claimed(&identity),
        total_claimed: registry.total_claimed(),
    };
    info!(
        eligible = status.eligible,
        claimed = status.claimed,
        total_claimed = status.total_claimed,
        epoch = config.epoch,
        "Claim status"
    );
    Ok(status)
}
