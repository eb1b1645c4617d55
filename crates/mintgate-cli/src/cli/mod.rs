//! Command-line interface for the `mintgate` CLI application.

mod claim;
mod config;
pub mod constants;
mod verify;

use clap::Parser;
use eyre::{Result, eyre};
use mintgate_core::base::Identity;
use mintgate_core::schema::config::HashScheme;

pub use self::claim::ClaimCommands;
pub use self::config::ConfigCommands;
pub use self::verify::VerifyCommands;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "mintgate")]
#[command(about = "Merkle allowlist tools for one-time gated claims")]
pub struct Cli {
    /// CLI top-level command group.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Allowlist configuration utilities (administrator).
    Config {
        /// Config subcommands.
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Claim pipeline commands.
    Claim {
        /// Claim subcommands.
        #[command(subcommand)]
        command: ClaimCommands,
    },
    /// Verification pipeline commands.
    Verify {
        /// Verify subcommands.
        #[command(subcommand)]
        command: VerifyCommands,
    },
}

pub fn parse_hash_scheme(s: &str) -> Result<HashScheme> {
    HashScheme::from_str_name(s).ok_or_else(|| {
        eyre!("Invalid hash scheme: {s}. Expected 'keccak256' or 'sha256'.")
    })
}

pub fn parse_identity(s: &str) -> Result<Identity> {
    s.parse::<Identity>()
        .map_err(|e| eyre!("Invalid identity '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[test]
    fn hash_scheme_parse() {
        assert_eq!(
            parse_hash_scheme("keccak256").expect("keccak256 should parse"),
            HashScheme::Keccak256
        );
        assert_eq!(
            parse_hash_scheme("sha256").expect("sha256 should parse"),
            HashScheme::Sha256
        );
        assert!(parse_hash_scheme("blake2b").is_err());
    }

    #[test]
    fn identity_parse() {
        let identity = parse_identity("0x00000000000000000000000000000000000000ff")
            .expect("identity should parse");
        assert_eq!(identity.as_bytes().last(), Some(&0xff));
        assert!(parse_identity("0xff").is_err());
    }

    #[test]
    fn parse_config_build_requires_identities() {
        let cli = Cli::try_parse_from(["mintgate", "config", "build"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "mintgate",
            "config",
            "build",
            "--identities",
            "identities.txt",
            "--scheme",
            "sha256",
            "--epoch",
            "3",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn parse_config_build_rejects_tree_out_with_no_tree() {
        let cli = Cli::try_parse_from([
            "mintgate",
            "config",
            "build",
            "--identities",
            "identities.txt",
            "--tree-out",
            "tree.json",
            "--no-tree",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn parse_claim_prove_requires_exactly_one_source() {
        let identity = "0x1111111111111111111111111111111111111111";
        let cli = Cli::try_parse_from(["mintgate", "claim", "prove", "--identity", identity]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "mintgate",
            "claim",
            "prove",
            "--identity",
            identity,
            "--identities",
            "identities.txt",
            "--tree",
            "tree.json",
        ]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "mintgate",
            "claim",
            "prove",
            "--identity",
            identity,
            "--tree",
            "tree.json",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn parse_verify_proof_uses_defaults() {
        let cli = Cli::try_parse_from(["mintgate", "verify", "proof"]).expect("should parse");
        let Commands::Verify {
            command: VerifyCommands::Proof { args },
        } = cli.command
        else {
            panic!("expected verify proof");
        };
        assert_eq!(args.proof_in.to_str(), Some(constants::DEFAULT_PROOF_FILE));
        assert_eq!(args.config.to_str(), Some(constants::DEFAULT_CONFIG_FILE));
    }
}
