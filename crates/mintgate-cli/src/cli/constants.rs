//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Common
pub const MINTGATE_CONFIG_FILE: &str = "MINTGATE_CONFIG_FILE";
pub const MINTGATE_IDENTITIES_FILE: &str = "MINTGATE_IDENTITIES_FILE";
pub const MINTGATE_IDENTITY: &str = "MINTGATE_IDENTITY";
pub const MINTGATE_LEDGER_FILE: &str = "MINTGATE_LEDGER_FILE";

// Config
pub const MINTGATE_HASH_SCHEME: &str = "MINTGATE_HASH_SCHEME";
pub const MINTGATE_EPOCH: &str = "MINTGATE_EPOCH";
pub const MINTGATE_CONFIG_OUT: &str = "MINTGATE_CONFIG_OUT";
pub const MINTGATE_TREE_OUT: &str = "MINTGATE_TREE_OUT";
pub const MINTGATE_NO_TREE: &str = "MINTGATE_NO_TREE";

// Claim
pub const MINTGATE_TREE_FILE: &str = "MINTGATE_TREE_FILE";
pub const MINTGATE_PROOF_OUT: &str = "MINTGATE_PROOF_OUT";
pub const MINTGATE_PROOF_IN: &str = "MINTGATE_PROOF_IN";

// -------------------------
// Default values
// -------------------------

// File paths
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_TREE_FILE: &str = "tree.json";
pub const DEFAULT_PROOF_FILE: &str = "claim-proof.json";
pub const DEFAULT_LEDGER_FILE: &str = "claims-ledger.json";

// Parsed values
pub const DEFAULT_HASH_SCHEME: &str = "keccak256";
pub const DEFAULT_EPOCH: &str = "0";
