//! Second-generation signature work
//!
//! A private key is regenerated from the hash of the work input and signs
//! the hash of its own seed. The summary is derived from that digest and the
//! key recovered over the signature hash, so verification costs exactly as
//! much as creation.

use crate::work::WorkProof;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, recover_public_key, validate_account_name, AccountName, BlockId, Canonicality, Digest,
    ProtocolConfig, Result, SigningKey, ValidationError,
};
use tracing::debug;

/// Inputs a miner commits to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pow2Input {
    /// Account credited for the work
    pub worker_account: AccountName,
    /// Block the work builds on
    pub prev_block: BlockId,
    /// Miner-chosen nonce
    pub nonce: u64,
}

impl Pow2Input {
    /// Bundle the three inputs
    pub fn new(worker_account: impl Into<AccountName>, prev_block: BlockId, nonce: u64) -> Self {
        Self {
            worker_account: worker_account.into(),
            prev_block,
            nonce,
        }
    }
}

/// Second-generation proof of work record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pow2 {
    /// Committed inputs
    pub input: Pow2Input,
    /// Approximate log of the work digest
    pub pow_summary: u32,
}

fn compute_summary(input: &Pow2Input) -> Result<u32> {
    let seed = Digest::hash_encoded(input)?;
    let signed = Digest::hash(seed.as_bytes());
    let signature = SigningKey::from_digest(&seed)?.sign_compact(&signed, Canonicality::Canonical)?;
    let recovered = recover_public_key(&signature, &signature.digest())?;
    let work = Digest::hash_chunks(&[signed.as_bytes(), &recovered.serialize()]);
    Ok(work.approx_log_32())
}

impl Pow2 {
    /// Derive the work for `(prev_block, worker_account, nonce)`
    pub fn create(prev_block: BlockId, worker_account: &str, nonce: u64) -> Result<Self> {
        let input = Pow2Input::new(worker_account, prev_block, nonce);
        let pow_summary = compute_summary(&input)?;
        debug!(
            worker = %input.worker_account,
            nonce,
            pow_summary,
            "Created pow2 work"
        );
        Ok(Self { input, pow_summary })
    }
}

impl WorkProof for Pow2 {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("work.input.worker_account", &self.input.worker_account, config)?;
        let expected = compute_summary(&self.input)?;
        ensure!(
            expected == self.pow_summary,
            ValidationError::crypto("reported work does not match calculated work")
        );
        Ok(())
    }

    fn summary(&self) -> u32 {
        self.pow_summary
    }
}
