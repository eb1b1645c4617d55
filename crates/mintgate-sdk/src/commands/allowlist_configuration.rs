use std::path::PathBuf;

use eyre::Context as _;
use mintgate_core::schema::config::AllowlistConfiguration;
use mintgate_merkle::AllowlistTree;
use tracing::{info, instrument};

use super::write_output;
use crate::common::CommonConfig;
use crate::identity_list::read_identity_list;

/// Build the allowlist configuration from an identity list and export it,
/// optionally together with a tree dump for claimants.
///
/// # Errors
/// Returns an error if the identity list is invalid or writing files fails.
#[instrument(skip_all, fields(epoch = config.epoch, scheme = %config.hash_scheme))]
pub async fn build_allowlist_configuration(
    config: CommonConfig,
    identities_file: PathBuf,
    configuration_output_file: PathBuf,
    tree_output_file: Option<PathBuf>,
) -> eyre::Result<()> {
    let identities = read_identity_list(&identities_file).await?;

    let scheme = config.hash_scheme;
    let tree = tokio::task::spawn_blocking(move || {
        AllowlistTree::build_with_progress(scheme, &identities, |processed, total| {
            info!(processed, total, "Hashing identities");
        })
    })
    .await?
    .context("Failed to build allowlist tree")?;

    info!(
        root = %tree.root(),
        leaf_count = tree.leaf_count(),
        depth = tree.depth(),
        "Computed allowlist root"
    );

    let config_out = AllowlistConfiguration::new(
        config.epoch,
        scheme,
        tree.leaf_count(),
        tree.depth(),
        tree.root(),
    );
    let json = serde_json::to_string_pretty(&config_out)?;
    write_output(&configuration_output_file, &json).await?;
    info!(file = ?configuration_output_file, "Exported configuration");

    if let Some(tree_output_file) = tree_output_file {
        let json = serde_json::to_string_pretty(&tree.to_dump())?;
        write_output(&tree_output_file, &json).await?;
        info!(file = ?tree_output_file, "Exported tree dump");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use mintgate_core::base::Digest;
    use mintgate_core::schema::config::HashScheme;
    use mintgate_core::schema::tree::TreeDump;

    use super::*;

    #[tokio::test]
    async fn exports_configuration_and_tree() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let identities = dir.path().join("identities.txt");
        let config_out = dir.path().join("config.json");
        let tree_out = dir.path().join("tree.json");
        tokio::fs::write(
            &identities,
            "0x1111111111111111111111111111111111111111\n\
             0x2222222222222222222222222222222222222222\n\
             0x3333333333333333333333333333333333333333\n",
        )
        .await
        .expect("Failed to write identities");

        build_allowlist_configuration(
            CommonConfig {
                hash_scheme: HashScheme::Keccak256,
                epoch: 4,
            },
            identities,
            config_out.clone(),
            Some(tree_out.clone()),
        )
        .await
        .expect("configuration should build");

        let config: AllowlistConfiguration = serde_json::from_str(
            &tokio::fs::read_to_string(&config_out)
                .await
                .expect("Failed to read config"),
        )
        .expect("Failed to parse config");
        assert_eq!(config.epoch, 4);
        assert_eq!(config.leaf_count, 3);
        assert_eq!(config.depth, 2);
        assert_eq!(
            config.merkle_root,
            "0xebe89c47b6c858ae61be898383061fc7975109c10edf3aec57e24bc8ce75677e"
                .parse::<Digest>()
                .expect("valid digest")
        );

        let dump: TreeDump = serde_json::from_str(
            &tokio::fs::read_to_string(&tree_out)
                .await
                .expect("Failed to read tree"),
        )
        .expect("Failed to parse tree");
        assert_eq!(dump.merkle_root, config.merkle_root);
        assert_eq!(dump.entries.len(), 3);
    }

    #[tokio::test]
    async fn duplicate_identities_fail() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let identities = dir.path().join("identities.txt");
        let config_out = dir.path().join("config.json");
        tokio::fs::write(
            &identities,
            "1111111111111111111111111111111111111111\n\
             1111111111111111111111111111111111111111\n",
        )
        .await
        .expect("Failed to write identities");

        let result =
            build_allowlist_configuration(CommonConfig::default(), identities, config_out.clone(), None)
                .await;
        assert!(result.is_err());
        assert!(!config_out.exists());
    }
}
