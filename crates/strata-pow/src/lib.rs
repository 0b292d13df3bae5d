//! Strata PoW - miner proofs of work
//!
//! Three generations of work proofs, each created once by a miner and then
//! re-validated by every node that receives it:
//!
//! - [`Pow`]: legacy signature work over a nonce-stamped block id
//! - [`Pow2`]: key regenerated from the input signs its own derivation;
//!   validation re-runs creation and compares the summary
//! - [`EquihashPow`]: an Equihash solution seeded by the input
//!
//! Validation is deterministic and reads nothing but the record and the
//! [`ProtocolConfig`](strata_core::ProtocolConfig).

#![forbid(unsafe_code)]

/// Equihash parameters, solver and verifier
pub mod equihash;

/// Equihash-backed second-generation work
pub mod equihash_pow;

/// Legacy signature work
pub mod legacy;

/// Second-generation signature work
pub mod pow2;

/// Common validation seam over work variants
pub mod work;

pub use equihash::{EquihashParams, Proof};
pub use equihash_pow::EquihashPow;
pub use legacy::{work_input, Pow};
pub use pow2::{Pow2, Pow2Input};
pub use work::{Pow2Work, WorkProof};
