//! Application command implementations.
//!
//! This module contains the core logic for each CLI subcommand.

mod allowlist_configuration;
mod claim_proof;
mod claim_status;
mod claim_submit;
mod output;
mod verify_proof;

use std::path::Path;

use eyre::Context as _;
use mintgate_core::schema::config::AllowlistConfiguration;
use tracing::info;

pub use allowlist_configuration::build_allowlist_configuration;
pub use claim_proof::{MembershipSource, generate_claim_proof};
pub use claim_status::{ClaimStatus, claim_status};
pub use claim_submit::submit_claim;
pub use output::write_output;
pub use verify_proof::{ProofRejection, check_claim_proof, verify_claim_proof};

/// Generates and prints the JSON schema for the `AllowlistConfiguration` struct.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
pub fn allowlist_configuration_schema() -> eyre::Result<()> {
    let schema = schemars::schema_for!(AllowlistConfiguration);
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("Allowlist Configuration JSON Schema:\n{schema_str}");
    Ok(())
}

/// Read a published allowlist configuration.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
async fn read_configuration(path: &Path) -> eyre::Result<AllowlistConfiguration> {
    let config: AllowlistConfiguration = serde_json::from_str(
        &tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read configuration {}", path.display()))?,
    )
    .context("Failed to parse allowlist configuration JSON")?;
    info!(
        file = ?path,
        epoch = config.epoch,
        root = %config.merkle_root,
        "Loaded configuration"
    );
    Ok(config)
}
