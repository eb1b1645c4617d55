use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::base::Digest;

/// Configuration published for one allowlist epoch.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct AllowlistConfiguration {
    /// Allowlist version. A new identity set is a new epoch with a new root.
    pub epoch: u64,
    /// Hash function used for leaves and nodes.
    #[serde(default)]
    pub hash_scheme: HashScheme,
    /// Number of identities in the allowlist.
    pub leaf_count: usize,
    /// Number of levels above the leaves; every proof has this many steps.
    pub depth: usize,
    /// Merkle root to be stored by the ledger.
    #[schemars(with = "String")]
    pub merkle_root: Digest,
}

impl AllowlistConfiguration {
    /// Create a new allowlist configuration.
    #[must_use]
    pub const fn new(
        epoch: u64,
        hash_scheme: HashScheme,
        leaf_count: usize,
        depth: usize,
        merkle_root: Digest,
    ) -> Self {
        Self {
            epoch,
            hash_scheme,
            leaf_count,
            depth,
            merkle_root,
        }
    }
}

/// Hash function selection for the tree.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    /// Keccak-256, as used by EVM ledgers.
    #[default]
    Keccak256,
    /// SHA-256.
    Sha256,
}

impl HashScheme {
    /// Parse from CLI string.
    #[must_use]
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "keccak256" => Some(Self::Keccak256),
            "sha256" => Some(Self::Sha256),
            _ => None,
        }
    }

    /// Name used in CLI arguments and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keccak256 => "keccak256",
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_json_format() {
        // Documents the expected JSON format for consumers
        let json = r#"{
          "epoch": 3,
          "hash_scheme": "sha256",
          "leaf_count": 3,
          "depth": 2,
          "merkle_root": "0x0505050505050505050505050505050505050505050505050505050505050505"
        }"#;

        let config: AllowlistConfiguration =
            serde_json::from_str(json).expect("Failed to deserialize JSON");

        let expected = AllowlistConfiguration::new(
            3,
            HashScheme::Sha256,
            3,
            2,
            Digest::new([5_u8; 32_usize]),
        );
        assert_eq!(config, expected);
    }

    #[test]
    fn hash_scheme_defaults_to_keccak() {
        let json = r#"{
          "epoch": 0,
          "leaf_count": 1,
          "depth": 0,
          "merkle_root": "0x0101010101010101010101010101010101010101010101010101010101010101"
        }"#;
        let config: AllowlistConfiguration =
            serde_json::from_str(json).expect("Failed to deserialize JSON");
        assert_eq!(config.hash_scheme, HashScheme::Keccak256);
    }

    #[test]
    fn hash_scheme_names_roundtrip() {
        for scheme in [HashScheme::Keccak256, HashScheme::Sha256] {
            assert_eq!(HashScheme::from_str_name(scheme.as_str()), Some(scheme));
        }
        assert_eq!(HashScheme::from_str_name("blake2"), None);
    }
}
