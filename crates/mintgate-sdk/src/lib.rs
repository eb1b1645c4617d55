//! Mintgate workflows shared by the CLI and other front ends.

/// One-time claim processing against a published root.
pub mod claim_gate;
/// Application command implementations.
pub mod commands;
/// CLI-independent configuration types.
pub mod common;
/// Identity list file parsing.
pub mod identity_list;
