//! Legacy signature work
//!
//! The miner signs a nonce-stamped digest of a recent block id with its
//! worker key. The work value is the hash of the key recovered from that
//! signature over the signature's own hash, so it cannot be chosen freely.

use crate::work::WorkProof;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, recover_public_key, BlockId, Canonicality, CompactSignature, Digest, ProtocolConfig,
    PublicKey, Result, SigningKey, ValidationError,
};
use tracing::debug;

/// Deterministic work input: the block id hash with its first eight bytes
/// replaced by the little-endian nonce, hashed again
pub fn work_input(block_id: &BlockId, nonce: u64) -> Digest {
    let mut stamped = Digest::hash(&block_id.0);
    stamped.0[..8].copy_from_slice(&nonce.to_le_bytes());
    Digest::hash(stamped.as_bytes())
}

/// Legacy proof of work record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pow {
    /// Key that produced the signature
    pub worker: PublicKey,
    /// Digest that was signed
    pub input: Digest,
    /// Non-canonical compact signature over `input`
    pub signature: CompactSignature,
    /// Hash of the key recovered from `signature` over its own hash
    pub work: Digest,
}

fn derived_work(signature: &CompactSignature) -> Result<Digest> {
    let recovered = recover_public_key(signature, &signature.digest())?;
    Ok(Digest::hash(&recovered.serialize()))
}

impl Pow {
    /// Sign `input` with the worker key and derive the work value
    pub fn create(worker: &SigningKey, input: Digest) -> Result<Self> {
        let signature = worker.sign_compact(&input, Canonicality::NonCanonical)?;
        let work = derived_work(&signature)?;
        debug!(input = %input, work = %work, "Created legacy work");
        Ok(Self {
            worker: worker.public_key(),
            input,
            signature,
            work,
        })
    }
}

impl WorkProof for Pow {
    fn validate(&self, _config: &ProtocolConfig) -> Result<()> {
        ensure!(!self.work.is_zero(), ValidationError::crypto("work is empty"));
        let signer = recover_public_key(&self.signature, &self.input)?;
        ensure!(
            signer == self.worker,
            ValidationError::crypto("signature was not produced by the worker key")
        );
        ensure!(
            derived_work(&self.signature)? == self.work,
            ValidationError::crypto("recorded work does not match the signature")
        );
        Ok(())
    }

    fn summary(&self) -> u32 {
        self.work.approx_log_32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strata_testkit::{test_block_id, test_config, test_signing_key};

    #[test]
    fn test_work_input_depends_on_nonce() {
        let block = test_block_id(1);
        assert_eq!(work_input(&block, 7), work_input(&block, 7));
        assert_ne!(work_input(&block, 7), work_input(&block, 8));
        assert_ne!(work_input(&block, 7), work_input(&test_block_id(2), 7));
    }

    #[test]
    fn test_create_then_validate() {
        let pow = Pow::create(&test_signing_key(1), work_input(&test_block_id(1), 42)).unwrap();
        assert!(pow.validate(&test_config()).is_ok());
    }

    #[test]
    fn test_rejects_foreign_worker() {
        let mut pow = Pow::create(&test_signing_key(1), work_input(&test_block_id(1), 42)).unwrap();
        pow.worker = test_signing_key(2).public_key();
        assert_matches!(pow.validate(&test_config()), Err(ValidationError::Crypto { .. }));
    }

    #[test]
    fn test_rejects_forged_work() {
        let mut pow = Pow::create(&test_signing_key(1), work_input(&test_block_id(1), 42)).unwrap();
        pow.work = Digest::hash(b"forged");
        assert_matches!(pow.validate(&test_config()), Err(ValidationError::Crypto { .. }));
        pow.work = Digest::default();
        assert_matches!(pow.validate(&test_config()), Err(ValidationError::Crypto { .. }));
    }

    #[test]
    fn test_rejects_changed_input() {
        let mut pow = Pow::create(&test_signing_key(1), work_input(&test_block_id(1), 42)).unwrap();
        pow.input = work_input(&test_block_id(1), 43);
        assert!(pow.validate(&test_config()).is_err());
    }
}
