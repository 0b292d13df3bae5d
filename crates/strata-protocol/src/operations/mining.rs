//! Miner work submissions and witness misbehavior reports

use super::Validate;
use crate::block_header::SignedBlockHeader;
use crate::chain_properties::ChainProperties;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, AccountName, BlockId, Digest, ProtocolConfig, PublicKey,
    Result, ValidationError,
};
use strata_pow::{work_input, Pow, Pow2Work, WorkProof};

/// Legacy mining submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowOperation {
    /// Account credited for the work
    pub worker_account: AccountName,
    /// Block the work builds on
    pub block_id: BlockId,
    /// Miner-chosen nonce
    pub nonce: u64,
    /// Signature work over the nonce-stamped block id
    pub work: Pow,
    /// Chain parameters proposed by the miner
    pub props: ChainProperties,
}

impl PowOperation {
    /// Input the work must have been computed over
    pub fn work_input(&self) -> Digest {
        work_input(&self.block_id, self.nonce)
    }
}

impl Validate for PowOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        self.props.validate(config, true)?;
        validate_account_name("worker_account", &self.worker_account, config)?;
        ensure!(
            self.work_input() == self.work.input,
            ValidationError::crypto("deterministic input does not match recorded input")
        );
        self.work.validate(config)
    }
}

/// Second-generation mining submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pow2Operation {
    /// Signature work or Equihash solution
    pub work: Pow2Work,
    /// Owner key for a worker account that does not exist yet
    pub new_owner_key: Option<PublicKey>,
    /// Chain parameters proposed by the miner
    pub props: ChainProperties,
}

impl Validate for Pow2Operation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        self.props.validate(config, true)?;
        self.work.validate(config)
    }
}

/// Evidence that a witness signed two different blocks for one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOverProductionOperation {
    /// Reporting account
    pub reporter: AccountName,
    /// First conflicting header
    pub first_block: SignedBlockHeader,
    /// Second conflicting header
    pub second_block: SignedBlockHeader,
}

impl Validate for ReportOverProductionOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        let (first, second) = (&self.first_block, &self.second_block);
        validate_account_name("reporter", &self.reporter, config)?;
        validate_account_name("first_block.witness", &first.header.witness, config)?;
        ensure!(
            first.header.witness == second.header.witness,
            ValidationError::structural("blocks were produced by different witnesses")
        );
        ensure!(
            first.header.timestamp == second.header.timestamp,
            ValidationError::structural("blocks were produced for different slots")
        );
        ensure!(
            first.signee()? == second.signee()?,
            ValidationError::crypto("blocks were signed by different keys")
        );
        ensure!(
            first.id()? != second.id()?,
            ValidationError::structural("both reports describe the same block")
        );
        Ok(())
    }
}
