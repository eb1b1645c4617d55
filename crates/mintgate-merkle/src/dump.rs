//! Conversion between [`AllowlistTree`] and its serialized [`TreeDump`].

use mintgate_core::base::Identity;
use mintgate_core::schema::tree::{TREE_DUMP_FORMAT, TreeDump, TreeDumpEntry};

use crate::core::MerkleError;
use crate::encoding::leaf_hash;
use crate::tree::AllowlistTree;

impl AllowlistTree {
    /// Serialize the leaf level and root.
    #[must_use]
    pub fn to_dump(&self) -> TreeDump {
        TreeDump {
            format: TREE_DUMP_FORMAT.to_owned(),
            hash_scheme: self.scheme(),
            merkle_root: self.root(),
            entries: self
                .entries()
                .map(|(identity, leaf)| TreeDumpEntry { identity, leaf })
                .collect(),
        }
    }

    /// Rebuild a tree from a dump, checking every stored digest.
    ///
    /// # Errors
    /// Returns [`MerkleError::UnsupportedDumpFormat`] for an unknown format tag,
    /// [`MerkleError::DumpLeafMismatch`] if a stored leaf is not the leaf of its
    /// identity, [`MerkleError::DumpRootMismatch`] if the rebuilt root differs,
    /// and any error [`AllowlistTree::build`] returns for the identities.
    pub fn from_dump(dump: &TreeDump) -> Result<Self, MerkleError> {
        if dump.format != TREE_DUMP_FORMAT {
            return Err(MerkleError::UnsupportedDumpFormat(dump.format.clone()));
        }

        if let Some(entry) = dump
            .entries
            .iter()
            .find(|entry| leaf_hash(dump.hash_scheme, &entry.identity) != entry.leaf)
        {
            return Err(MerkleError::DumpLeafMismatch(entry.identity));
        }

        let identities: Vec<Identity> = dump.entries.iter().map(|entry| entry.identity).collect();
        let tree = Self::build(dump.hash_scheme, &identities)?;
        if tree.root() != dump.merkle_root {
            return Err(MerkleError::DumpRootMismatch {
                stored: dump.merkle_root,
                rebuilt: tree.root(),
            });
        }
        Ok(tree)
    }
}
