//! Serialized schema/data contracts.

/// Claim proof file schema types.
pub mod claim;
/// Allowlist configuration schema types.
pub mod config;
/// Claim ledger schema types.
pub mod ledger;
/// Tree dump schema types.
pub mod tree;
