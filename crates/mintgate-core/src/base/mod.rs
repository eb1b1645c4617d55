//! Foundational primitive types and byte/serde helpers.

mod digest;
mod identity;
mod proof_step;
mod utils;

pub use digest::{DIGEST_SIZE, Digest};
pub use identity::{IDENTITY_SIZE, Identity};
pub use proof_step::{Position, ProofStep};
pub use utils::{ParseError, PrefixedHex, parse_prefixed_hex};
