//! Config subcommands.

use std::path::PathBuf;

use mintgate_core::schema::config::HashScheme;
use mintgate_sdk::common::CommonConfig;

use super::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_EPOCH, DEFAULT_HASH_SCHEME, DEFAULT_TREE_FILE,
    MINTGATE_CONFIG_OUT, MINTGATE_EPOCH, MINTGATE_HASH_SCHEME, MINTGATE_IDENTITIES_FILE,
    MINTGATE_NO_TREE, MINTGATE_TREE_OUT,
};
use super::parse_hash_scheme;

/// Arguments for `config build`.
#[derive(Debug, clap::Args)]
pub struct ConfigBuildArgs {
    /// Identity list file: one hex identity per line, or a `.json` array.
    #[arg(long, env = MINTGATE_IDENTITIES_FILE)]
    pub identities: PathBuf,
    /// Hash function for leaves and nodes.
    #[arg(
        long,
        env = MINTGATE_HASH_SCHEME,
        default_value = DEFAULT_HASH_SCHEME,
        value_parser = parse_hash_scheme
    )]
    pub scheme: HashScheme,
    /// Allowlist epoch. Bump it whenever the identity set changes.
    #[arg(long, env = MINTGATE_EPOCH, default_value = DEFAULT_EPOCH)]
    pub epoch: u64,
    /// Configuration output file.
    #[arg(long, env = MINTGATE_CONFIG_OUT, default_value = DEFAULT_CONFIG_FILE)]
    pub config_out: PathBuf,
    /// Tree dump output file for claimants.
    #[arg(long, env = MINTGATE_TREE_OUT, default_value = DEFAULT_TREE_FILE)]
    pub tree_out: PathBuf,
    /// Skip writing the tree dump.
    #[arg(
        long,
        env = MINTGATE_NO_TREE,
        default_value_t = false,
        conflicts_with = "tree_out"
    )]
    pub no_tree: bool,
}

impl ConfigBuildArgs {
    /// Tree dump path, unless disabled.
    pub fn tree_output(&self) -> Option<PathBuf> {
        (!self.no_tree).then(|| self.tree_out.clone())
    }
}

impl From<&ConfigBuildArgs> for CommonConfig {
    fn from(args: &ConfigBuildArgs) -> Self {
        Self {
            hash_scheme: args.scheme,
            epoch: args.epoch,
        }
    }
}

/// Config command group.
#[derive(Debug, clap::Subcommand)]
pub enum ConfigCommands {
    /// Build the allowlist root from an identity list.
    Build {
        #[command(flatten)]
        args: ConfigBuildArgs,
    },
    /// Print the JSON schema of the allowlist configuration.
    Schema,
}
