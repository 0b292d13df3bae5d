//! Equihash-backed second-generation work

use crate::equihash::{solve, EquihashParams, Proof};
use crate::pow2::Pow2Input;
use crate::work::WorkProof;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, BlockId, Digest, ProtocolConfig, Result, ValidationError,
};
use tracing::debug;

/// Equihash proof of work record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquihashPow {
    /// Committed inputs
    pub input: Pow2Input,
    /// Solution seeded by the hash of `input`
    pub proof: Proof,
    /// Approximate log of the hash of the solution indices
    pub pow_summary: u32,
}

fn solution_summary(proof: &Proof) -> Result<u32> {
    Ok(Digest::hash_encoded(&proof.inputs)?.approx_log_32())
}

impl EquihashPow {
    /// Solve the network Equihash instance for `(prev_block, worker_account, nonce)`
    pub fn create(
        prev_block: BlockId,
        worker_account: &str,
        nonce: u32,
        config: &ProtocolConfig,
    ) -> Result<Self> {
        let input = Pow2Input::new(worker_account, prev_block, u64::from(nonce));
        let seed = Digest::hash_encoded(&input)?;
        let proof = solve(EquihashParams::from_config(config)?, &seed)?;
        let pow_summary = solution_summary(&proof)?;
        debug!(
            worker = %input.worker_account,
            nonce,
            pow_summary,
            "Created equihash work"
        );
        Ok(Self {
            input,
            proof,
            pow_summary,
        })
    }
}

impl WorkProof for EquihashPow {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("work.input.worker_account", &self.input.worker_account, config)?;
        let seed = Digest::hash_encoded(&self.input)?;
        ensure!(
            self.proof.n == config.equihash_n,
            ValidationError::range(
                "work.proof.n",
                format!("expected {}, got {}", config.equihash_n, self.proof.n)
            )
        );
        ensure!(
            self.proof.k == config.equihash_k,
            ValidationError::range(
                "work.proof.k",
                format!("expected {}, got {}", config.equihash_k, self.proof.k)
            )
        );
        ensure!(
            self.proof.seed == seed,
            ValidationError::crypto("proof of work seed does not match expected seed")
        );
        if let Err(err) = self.proof.verify() {
            debug!(
                worker = %self.input.worker_account,
                prev_block = %self.input.prev_block,
                nonce = self.input.nonce,
                error = %err,
                "Rejected equihash proof"
            );
            return Err(ValidationError::crypto(format!(
                "proof of work is not a solution: {err}"
            )));
        }
        ensure!(
            solution_summary(&self.proof)? == self.pow_summary,
            ValidationError::crypto("reported work does not match the solution")
        );
        Ok(())
    }

    fn summary(&self) -> u32 {
        self.pow_summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strata_testkit::{test_block_id, test_config};

    #[test]
    fn test_create_then_validate() {
        let config = test_config();
        let work = EquihashPow::create(test_block_id(9), "miner", 1, &config).unwrap();
        assert_eq!(work.proof.inputs.len(), 32);
        assert!(work.validate(&config).is_ok());
    }

    #[test]
    fn test_parameter_mismatch_is_range_error() {
        let config = test_config();
        let work = EquihashPow::create(test_block_id(9), "miner", 1, &config).unwrap();
        let network = strata_core::ProtocolConfig {
            equihash_n: 60,
            equihash_k: 5,
            ..config
        };
        assert_matches!(work.validate(&network), Err(ValidationError::Range { ref field, .. }) if field == "work.proof.n");
    }

    #[test]
    fn test_input_change_breaks_seed() {
        let config = test_config();
        let mut work = EquihashPow::create(test_block_id(9), "miner", 1, &config).unwrap();
        work.input.nonce = 2;
        assert_matches!(work.validate(&config), Err(ValidationError::Crypto { .. }));
    }

    #[test]
    fn test_summary_mismatch() {
        let config = test_config();
        let mut work = EquihashPow::create(test_block_id(9), "miner", 1, &config).unwrap();
        work.pow_summary = work.pow_summary.wrapping_add(1);
        assert_matches!(work.validate(&config), Err(ValidationError::Crypto { .. }));
    }
}
