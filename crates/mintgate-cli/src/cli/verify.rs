//! Verify subcommands.

use std::path::PathBuf;

use super::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_PROOF_FILE, MINTGATE_CONFIG_FILE, MINTGATE_PROOF_IN,
};

/// Arguments for claim proof verification.
#[derive(Debug, clap::Args)]
pub struct VerifyProofArgs {
    /// Claim proof file to verify.
    #[arg(long, env = MINTGATE_PROOF_IN, default_value = DEFAULT_PROOF_FILE)]
    pub proof_in: PathBuf,
    /// Allowlist configuration file.
    #[arg(long, env = MINTGATE_CONFIG_FILE, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// Verify command group.
#[derive(Debug, clap::Subcommand)]
pub enum VerifyCommands {
    /// Verify a claim proof against the published configuration.
    Proof {
        #[command(flatten)]
        args: VerifyProofArgs,
    },
}
