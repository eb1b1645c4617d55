use std::path::PathBuf;

use eyre::{Context as _, ContextCompat as _, ensure};
use mintgate_core::base::Identity;
use mintgate_core::schema::claim::ClaimProof;
use mintgate_core::schema::config::AllowlistConfiguration;
use mintgate_core::schema::tree::TreeDump;
use mintgate_merkle::AllowlistTree;
use tracing::{info, instrument};

use super::{read_configuration, write_output};
use crate::identity_list::read_identity_list;

/// Where a claimant gets the allowlist from.
#[derive(Debug, Clone)]
pub enum MembershipSource {
    /// Rebuild the tree from the published identity list.
    Identities(PathBuf),
    /// Load a tree dump written by `config build`.
    Tree(PathBuf),
}

/// Generate the membership proof for `identity` and write it as a claim proof file.
///
/// # Errors
/// Returns an error if the allowlist does not reproduce the configured root,
/// or if `identity` is not a member.
#[instrument(skip_all, fields(identity = %identity))]
pub async fn generate_claim_proof(
    identity: Identity,
    source: MembershipSource,
    configuration_file: PathBuf,
    proof_output_file: PathBuf,
) -> eyre::Result<()> {
    let config = read_configuration(&configuration_file).await?;
    let tree = load_allowlist_tree(&config, source).await?;

    let proof = tree
        .proof_for(&identity)
        .context("Identity is not eligible for this allowlist")?;
    let leaf = tree
        .leaf_of(&identity)
        .context("Member identity has no leaf")?;
    info!(proof_len = proof.len(), leaf = %leaf, "Generated membership proof");

    let claim = ClaimProof {
        epoch: config.epoch,
        hash_scheme: config.hash_scheme,
        merkle_root: tree.root(),
        identity,
        leaf,
        evm_proof: proof.siblings(),
        proof: proof.into_steps(),
    };
    let json = serde_json::to_string_pretty(&claim)?;
    write_output(&proof_output_file, &json).await?;

    info!(file = ?proof_output_file, "Exported claim proof");
    Ok(())
}

/// Load the allowlist tree and check it against the published configuration.
///
/// # Errors
/// Returns an error if the source cannot be loaded or its root or scheme
/// differs from `config`.
pub(super) async fn load_allowlist_tree(
    config: &AllowlistConfiguration,
    source: MembershipSource,
) -> eyre::Result<AllowlistTree> {
    let tree = match source {
        MembershipSource::Identities(path) => {
            let identities = read_identity_list(&path).await?;
            let scheme = config.hash_scheme;
            tokio::task::spawn_blocking(move || AllowlistTree::build(scheme, &identities))
                .await?
                .context("Failed to build allowlist tree")?
        }
        MembershipSource::Tree(path) => {
            info!(file = ?path, "Loading tree dump");
            let dump: TreeDump = serde_json::from_str(
                &tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read tree dump {}", path.display()))?,
            )
            .context("Failed to parse tree dump JSON")?;
            ensure!(
                dump.hash_scheme == config.hash_scheme,
                "Tree dump uses {} but configuration uses {}",
                dump.hash_scheme,
                config.hash_scheme
            );
            tokio::task::spawn_blocking(move || AllowlistTree::from_dump(&dump))
                .await?
                .context("Invalid tree dump")?
        }
    };

    ensure!(
        tree.root() == config.merkle_root,
        "Allowlist root {} does not match configuration root {} (epoch {})",
        tree.root(),
        config.merkle_root,
        config.epoch
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use mintgate_core::schema::config::HashScheme;
    use mintgate_merkle::ProofVerifier;

    use super::*;
    use crate::commands::build_allowlist_configuration;
    use crate::common::CommonConfig;

    const IDENTITIES: &str = "0x1111111111111111111111111111111111111111\n\
                              0x2222222222222222222222222222222222222222\n\
                              0x3333333333333333333333333333333333333333\n\
                              0x4444444444444444444444444444444444444444\n\
                              0x5555555555555555555555555555555555555555\n";

    struct Fixture {
        dir: tempfile::TempDir,
        identities: PathBuf,
        config: PathBuf,
        tree: PathBuf,
    }

    async fn fixture(scheme: HashScheme) -> Fixture {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let identities = dir.path().join("identities.txt");
        let config = dir.path().join("config.json");
        let tree = dir.path().join("tree.json");
        tokio::fs::write(&identities, IDENTITIES)
            .await
            .expect("Failed to write identities");
        build_allowlist_configuration(
            CommonConfig {
                hash_scheme: scheme,
                epoch: 1,
            },
            identities.clone(),
            config.clone(),
            Some(tree.clone()),
        )
        .await
        .expect("configuration should build");
        Fixture {
            dir,
            identities,
            config,
            tree,
        }
    }

    async fn read_claim(path: &std::path::Path) -> ClaimProof {
        serde_json::from_str(
            &tokio::fs::read_to_string(path)
                .await
                .expect("Failed to read claim proof"),
        )
        .expect("Failed to parse claim proof")
    }

    #[tokio::test]
    async fn proofs_from_list_and_dump_agree() {
        let fx = fixture(HashScheme::Sha256).await;
        let identity = Identity::new([0x33; 20]);
        let from_list = fx.dir.path().join("from-list.json");
        let from_tree = fx.dir.path().join("from-tree.json");

        generate_claim_proof(
            identity,
            MembershipSource::Identities(fx.identities.clone()),
            fx.config.clone(),
            from_list.clone(),
        )
        .await
        .expect("proof should generate");
        generate_claim_proof(
            identity,
            MembershipSource::Tree(fx.tree.clone()),
            fx.config.clone(),
            from_tree.clone(),
        )
        .await
        .expect("proof should generate");

        let a = read_claim(&from_list).await;
        let b = read_claim(&from_tree).await;
        assert_eq!(a, b);
        assert_eq!(a.hash_scheme, HashScheme::Sha256);
        assert_eq!(a.proof.len(), 3);
        assert!(a.evm_proof_matches());
        assert!(ProofVerifier::new(HashScheme::Sha256).verify(
            &a.merkle_root,
            &a.leaf,
            &a.proof.clone().into()
        ));
    }

    #[tokio::test]
    async fn non_member_gets_no_proof() {
        let fx = fixture(HashScheme::Keccak256).await;
        let out = fx.dir.path().join("claim-proof.json");
        let result = generate_claim_proof(
            Identity::new([0x99; 20]),
            MembershipSource::Identities(fx.identities.clone()),
            fx.config.clone(),
            out.clone(),
        )
        .await;
        assert!(result.is_err());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn stale_identity_list_is_rejected() {
        let fx = fixture(HashScheme::Keccak256).await;
        tokio::fs::write(
            &fx.identities,
            "0x1111111111111111111111111111111111111111\n",
        )
        .await
        .expect("Failed to rewrite identities");
        let result = generate_claim_proof(
            Identity::new([0x11; 20]),
            MembershipSource::Identities(fx.identities.clone()),
            fx.config.clone(),
            fx.dir.path().join("claim-proof.json"),
        )
        .await;
        assert!(result.is_err());
    }
}
