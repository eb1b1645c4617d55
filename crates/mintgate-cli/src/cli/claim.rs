//! Claim subcommands.

use std::path::PathBuf;

use eyre::eyre;
use mintgate_core::base::Identity;
use mintgate_sdk::commands::MembershipSource;

use super::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_LEDGER_FILE, DEFAULT_PROOF_FILE, MINTGATE_CONFIG_FILE,
    MINTGATE_IDENTITIES_FILE, MINTGATE_IDENTITY, MINTGATE_LEDGER_FILE, MINTGATE_PROOF_IN,
    MINTGATE_PROOF_OUT, MINTGATE_TREE_FILE,
};
use super::parse_identity;

/// Arguments for claim proof generation.
#[derive(Debug, clap::Args)]
pub struct ClaimProveArgs {
    /// Identity to prove membership for (20-byte hex, `0x` optional).
    #[arg(long, env = MINTGATE_IDENTITY, value_parser = parse_identity)]
    pub identity: Identity,
    /// Published identity list to rebuild the tree from.
    #[arg(
        long,
        env = MINTGATE_IDENTITIES_FILE,
        required_unless_present = "tree",
        conflicts_with = "tree"
    )]
    pub identities: Option<PathBuf>,
    /// Tree dump written by `config build`.
    #[arg(long, env = MINTGATE_TREE_FILE)]
    pub tree: Option<PathBuf>,
    /// Allowlist configuration file.
    #[arg(long, env = MINTGATE_CONFIG_FILE, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Output file for the claim proof.
    #[arg(long, env = MINTGATE_PROOF_OUT, default_value = DEFAULT_PROOF_FILE)]
    pub proof_out: PathBuf,
}

impl ClaimProveArgs {
    /// Where to load the allowlist from.
    pub fn membership_source(&self) -> eyre::Result<MembershipSource> {
        match (&self.identities, &self.tree) {
            (Some(path), None) => Ok(MembershipSource::Identities(path.clone())),
            (None, Some(path)) => Ok(MembershipSource::Tree(path.clone())),
            (Some(_), Some(_)) | (None, None) => {
                Err(eyre!("Exactly one of --identities or --tree is required"))
            }
        }
    }
}

/// Arguments for claim submission.
#[derive(Debug, clap::Args)]
pub struct ClaimSubmitArgs {
    /// Claim proof file to submit.
    #[arg(long, env = MINTGATE_PROOF_IN, default_value = DEFAULT_PROOF_FILE)]
    pub proof_in: PathBuf,
    /// Allowlist configuration file.
    #[arg(long, env = MINTGATE_CONFIG_FILE, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Claim ledger file. Created on first accepted claim.
    #[arg(long, env = MINTGATE_LEDGER_FILE, default_value = DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,
}

/// Arguments for claim status.
#[derive(Debug, clap::Args)]
pub struct ClaimStatusArgs {
    /// Identity to report on.
    #[arg(long, env = MINTGATE_IDENTITY, value_parser = parse_identity)]
    pub identity: Identity,
    /// Published identity list.
    #[arg(long, env = MINTGATE_IDENTITIES_FILE)]
    pub identities: PathBuf,
    /// Claim ledger file.
    #[arg(long, env = MINTGATE_LEDGER_FILE, default_value = DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,
    /// Allowlist configuration file.
    #[arg(long, env = MINTGATE_CONFIG_FILE, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// Claim command group.
#[derive(Debug, clap::Subcommand)]
pub enum ClaimCommands {
    /// Generate the membership proof for an identity.
    Prove {
        #[command(flatten)]
        args: ClaimProveArgs,
    },
    /// Submit a claim proof to the claim ledger (mints at most once).
    Submit {
        #[command(flatten)]
        args: ClaimSubmitArgs,
    },
    /// Report eligibility and claim state for an identity.
    Status {
        #[command(flatten)]
        args: ClaimStatusArgs,
    },
}
