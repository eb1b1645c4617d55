//! Persistent record of identities that already claimed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::base::Identity;

/// Claim ledger kept by the claim processor.
///
/// Claims survive root rotation: an identity that claimed under one epoch
/// stays claimed under every later epoch.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ClaimLedger {
    /// Claims in the order they were accepted.
    pub claims: Vec<ClaimRecord>,
}

/// One accepted claim.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ClaimRecord {
    /// Identity that claimed.
    #[schemars(with = "String")]
    pub identity: Identity,
    /// Sequential token id assigned to the claim, starting at 0.
    pub token_id: u64,
    /// Allowlist epoch the claim was accepted under.
    pub epoch: u64,
}
