//! Common validation seam over work variants

use crate::equihash_pow::EquihashPow;
use crate::pow2::Pow2;
use serde::{Deserialize, Serialize};
use strata_core::{ProtocolConfig, Result};

/// Behavior shared by every proof-of-work record
pub trait WorkProof {
    /// Re-derive the claimed work and fail unless it matches the record
    fn validate(&self, config: &ProtocolConfig) -> Result<()>;

    /// Compact difficulty summary carried by the record
    fn summary(&self) -> u32;
}

/// Work accepted by the second-generation mining operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pow2Work {
    /// Signature-derived work
    Pow2(Pow2),
    /// Equihash solution
    Equihash(EquihashPow),
}

impl Pow2Work {
    /// Account credited for the work
    pub fn worker_account(&self) -> &str {
        match self {
            Pow2Work::Pow2(work) => &work.input.worker_account,
            Pow2Work::Equihash(work) => &work.input.worker_account,
        }
    }
}

impl WorkProof for Pow2Work {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        match self {
            Pow2Work::Pow2(work) => work.validate(config),
            Pow2Work::Equihash(work) => work.validate(config),
        }
    }

    fn summary(&self) -> u32 {
        match self {
            Pow2Work::Pow2(work) => work.summary(),
            Pow2Work::Equihash(work) => work.summary(),
        }
    }
}

impl From<Pow2> for Pow2Work {
    fn from(work: Pow2) -> Self {
        Pow2Work::Pow2(work)
    }
}

impl From<EquihashPow> for Pow2Work {
    fn from(work: EquihashPow) -> Self {
        Pow2Work::Equihash(work)
    }
}
