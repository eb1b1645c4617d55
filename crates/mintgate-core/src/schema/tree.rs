//! Tree dump written by the administrator and loaded by claimants.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::config::HashScheme;
use crate::base::{Digest, Identity};

/// Format tag stored in every tree dump.
pub const TREE_DUMP_FORMAT: &str = "mintgate-tree-v1";

/// Serialized allowlist tree.
///
/// Only the sorted leaf level is stored; loaders rebuild the internal
/// nodes and compare against `merkle_root`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct TreeDump {
    /// Format tag, always [`TREE_DUMP_FORMAT`].
    pub format: String,
    /// Hash function used for leaves and nodes.
    pub hash_scheme: HashScheme,
    /// Root of the dumped tree.
    #[schemars(with = "String")]
    pub merkle_root: Digest,
    /// Entries in sorted-leaf order.
    pub entries: Vec<TreeDumpEntry>,
}

/// One leaf of a tree dump.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct TreeDumpEntry {
    /// Allowlisted identity.
    #[schemars(with = "String")]
    pub identity: Identity,
    /// Leaf digest of `identity`.
    #[schemars(with = "String")]
    pub leaf: Digest,
}
