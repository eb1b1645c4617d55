//! One-time claim processing.
//!
//! [`ClaimGate`] models the ledger side of a claim: an identity may mint
//! once, and only after its membership proof verifies against the
//! published root. The claimed set lives behind [`ClaimRegistry`].

use std::collections::HashSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::Context as _;
use mintgate_core::base::{Digest, Identity};
use mintgate_core::schema::config::AllowlistConfiguration;
use mintgate_core::schema::ledger::{ClaimLedger, ClaimRecord};
use mintgate_merkle::encoding::leaf_hash;
use mintgate_merkle::{Proof, ProofVerifier};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::commands::write_output;

/// Errors raised by a claim registry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The identity is already recorded as claimed.
    #[error("Identity {0} has already claimed")]
    AlreadyClaimed(Identity),
    /// No token ids are left.
    #[error("Token id space exhausted")]
    TokenIdsExhausted,
}

/// Store of identities that already claimed.
pub trait ClaimRegistry {
    /// Whether the identity has claimed.
    fn is_claimed(&self, identity: &Identity) -> bool;

    /// Record a claim and return the token id assigned to it.
    ///
    /// # Errors
    /// Returns [`RegistryError::AlreadyClaimed`] if the identity claimed before.
    fn mark_claimed(&mut self, identity: Identity, epoch: u64) -> Result<u64, RegistryError>;

    /// Number of claims recorded so far.
    fn total_claimed(&self) -> u64;
}

/// Result of one claim attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The proof verified and a token was assigned.
    Minted {
        /// Sequential id of the minted token.
        token_id: u64,
    },
    /// The proof does not link the identity to the root.
    NotWhitelisted,
    /// The identity already claimed.
    AlreadyClaimed,
}

/// Gate that accepts each allowlisted identity exactly once.
#[derive(Debug)]
pub struct ClaimGate<R> {
    verifier: ProofVerifier,
    epoch: u64,
    depth: usize,
    merkle_root: Digest,
    registry: R,
}

impl<R: ClaimRegistry> ClaimGate<R> {
    /// Create a gate for a published configuration.
    pub const fn new(config: &AllowlistConfiguration, registry: R) -> Self {
        Self {
            verifier: ProofVerifier::new(config.hash_scheme),
            epoch: config.epoch,
            depth: config.depth,
            merkle_root: config.merkle_root,
            registry,
        }
    }

    /// Process a claim for `identity`.
    ///
    /// The leaf is always recomputed from the identity, and proofs whose
    /// length differs from the tree depth are rejected, so an internal node
    /// can never be passed off as a leaf.
    ///
    /// # Errors
    /// Returns an error only if the registry fails to record a verified claim.
    pub fn process(
        &mut self,
        identity: &Identity,
        proof: &Proof,
    ) -> Result<ClaimOutcome, RegistryError> {
        if self.registry.is_claimed(identity) {
            return Ok(ClaimOutcome::AlreadyClaimed);
        }

        let leaf = leaf_hash(self.verifier.scheme(), identity);
        let verified =
            proof.len() == self.depth && self.verifier.verify(&self.merkle_root, &leaf, proof);
        if !verified {
            return Ok(ClaimOutcome::NotWhitelisted);
        }

        let token_id = self.registry.mark_claimed(*identity, self.epoch)?;
        Ok(ClaimOutcome::Minted { token_id })
    }

    /// Borrow the registry.
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Consume the gate and return its registry.
    pub fn into_registry(self) -> R {
        self.registry
    }
}

/// In-memory registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryClaimRegistry {
    claimed: HashSet<Identity>,
    next_token_id: u64,
}

impl ClaimRegistry for MemoryClaimRegistry {
    fn is_claimed(&self, identity: &Identity) -> bool {
        self.claimed.contains(identity)
    }

    fn mark_claimed(&mut self, identity: Identity, _epoch: u64) -> Result<u64, RegistryError> {
        if self.claimed.contains(&identity) {
            return Err(RegistryError::AlreadyClaimed(identity));
        }
        let token_id = self.next_token_id;
        self.next_token_id = token_id
            .checked_add(1)
            .ok_or(RegistryError::TokenIdsExhausted)?;
        self.claimed.insert(identity);
        Ok(token_id)
    }

    fn total_claimed(&self) -> u64 {
        self.next_token_id
    }
}

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(10);
const LOCK_POLL_ATTEMPTS: u32 = 1_000;

/// Exclusive hold on a ledger, backed by a `<ledger>.lock` file.
///
/// The lock file is removed on drop.
#[derive(Debug)]
struct LedgerLock {
    path: PathBuf,
}

impl LedgerLock {
    async fn acquire(ledger: &Path) -> eyre::Result<Self> {
        let path = lock_path_for(ledger);
        for _ in 0..LOCK_POLL_ATTEMPTS {
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(_) => {
                    debug!(file = ?path, "Acquired claim ledger lock");
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tokio::time::sleep(LOCK_POLL_INTERVAL).await;
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to create lock {}", path.display()));
                }
            }
        }
        eyre::bail!(
            "Claim ledger {} is locked; remove {} if no other submit is running",
            ledger.display(),
            path.display()
        )
    }
}

impl Drop for LedgerLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(file = ?self.path, error = %e, "Failed to remove claim ledger lock");
        }
    }
}

fn lock_path_for(ledger: &Path) -> PathBuf {
    let mut name = ledger
        .file_name()
        .map_or_else(OsString::new, ToOwned::to_owned);
    name.push(".lock");
    ledger.with_file_name(name)
}

/// Registry backed by a JSON [`ClaimLedger`] file.
///
/// Changes are kept in memory until [`FileClaimRegistry::save`] is called.
/// Only a registry opened with [`FileClaimRegistry::open_exclusive`] can be
/// saved, and it holds the ledger lock until dropped.
#[derive(Debug)]
pub struct FileClaimRegistry {
    path: PathBuf,
    ledger: ClaimLedger,
    claimed: HashSet<Identity>,
    lock: Option<LedgerLock>,
}

impl FileClaimRegistry {
    /// Open a read-only snapshot of the ledger at `path`, starting empty if
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed, if
    /// it records the same identity twice, or if its token ids are not
    /// sequential from 0.
    pub async fn open(path: &Path) -> eyre::Result<Self> {
        Self::load(path, None).await
    }

    /// Lock the ledger at `path` and open it for update.
    ///
    /// Waits while another process holds the lock. The lock is released when
    /// the registry is dropped, so the whole read, claim and
    /// [`FileClaimRegistry::save`] sequence is serialized per ledger.
    ///
    /// # Errors
    /// Returns an error if the lock cannot be acquired, or under the same
    /// conditions as [`FileClaimRegistry::open`].
    pub async fn open_exclusive(path: &Path) -> eyre::Result<Self> {
        let lock = LedgerLock::acquire(path).await?;
        Self::load(path, Some(lock)).await
    }

    async fn load(path: &Path, lock: Option<LedgerLock>) -> eyre::Result<Self> {
        let ledger = if tokio::fs::try_exists(path).await? {
            let contents = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read claim ledger {}", path.display()))?;
            serde_json::from_str::<ClaimLedger>(&contents)
                .context("Failed to parse claim ledger JSON")?
        } else {
            info!(file = ?path, "Starting new claim ledger");
            ClaimLedger::default()
        };

        let mut claimed = HashSet::with_capacity(ledger.claims.len());
        for (index, record) in ledger.claims.iter().enumerate() {
            eyre::ensure!(
                claimed.insert(record.identity),
                "Claim ledger records identity {} twice",
                record.identity
            );
            eyre::ensure!(
                u64::try_from(index).is_ok_and(|expected| expected == record.token_id),
                "Claim ledger record {index} has token id {}",
                record.token_id
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            ledger,
            claimed,
            lock,
        })
    }

    /// Recorded claims in acceptance order.
    #[must_use]
    pub fn records(&self) -> &[ClaimRecord] {
        &self.ledger.claims
    }

    /// Write the ledger back to its file.
    ///
    /// # Errors
    /// Returns an error if the registry was not opened with
    /// [`FileClaimRegistry::open_exclusive`], or if serialization or the
    /// write fails.
    pub async fn save(&self) -> eyre::Result<()> {
        eyre::ensure!(
            self.lock.is_some(),
            "Claim ledger {} was opened read-only",
            self.path.display()
        );
        let json = serde_json::to_string_pretty(&self.ledger)?;
        write_output(&self.path, &json).await?;
        info!(file = ?self.path, claims = self.ledger.claims.len(), "Saved claim ledger");
        Ok(())
    }
}

impl ClaimRegistry for FileClaimRegistry {
    fn is_claimed(&self, identity: &Identity) -> bool {
        self.claimed.contains(identity)
    }

    fn mark_claimed(&mut self, identity: Identity, epoch: u64) -> Result<u64, RegistryError> {
        if !self.claimed.insert(identity) {
            return Err(RegistryError::AlreadyClaimed(identity));
        }
        let token_id = self.total_claimed();
        self.ledger.claims.push(ClaimRecord {
            identity,
            token_id,
            epoch,
        });
        Ok(token_id)
    }

    fn total_claimed(&self) -> u64 {
        u64::try_from(self.ledger.claims.len()).unwrap_or(u64::MAX)
    }
}
