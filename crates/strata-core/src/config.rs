//! Network-wide protocol constants
//!
//! `ProtocolConfig` is established once at startup and passed by reference
//! into every validator. Nothing in the workspace reads these values from
//! global state.

use crate::ensure;
use crate::errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Immutable network constants consulted during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Fixed-point representation of 100%
    pub percent_100: u16,
    /// Maximum distinct members (accounts + keys) of one authority
    pub max_authority_membership: usize,
    /// Shortest permitted account name
    pub min_account_name_length: usize,
    /// Longest permitted account name
    pub max_account_name_length: usize,
    /// Permlinks must be strictly shorter than this
    pub max_permlink_length: usize,
    /// Memos must be strictly shorter than this
    pub max_memo_size: usize,
    /// Comment titles must be strictly shorter than this
    pub max_comment_title_size: usize,
    /// Longest permitted witness URL
    pub max_witness_url_length: usize,
    /// Longest permitted custom operation id
    pub max_custom_id_length: usize,
    /// Most payout beneficiaries on one comment
    pub max_beneficiaries: usize,
    /// Most votable assets on one comment
    pub max_votable_assets: usize,
    /// Smallest account creation fee a witness may propose
    pub min_account_creation_fee: i64,
    /// Largest fee accepted when claiming an account
    pub max_account_creation_fee: i64,
    /// Smallest maximum block size a witness may propose
    pub min_block_size_limit: u32,
    /// Lower bound for the account subsidy budget
    pub rd_min_budget: i32,
    /// Upper bound for the account subsidy budget
    pub rd_max_budget: i32,
    /// Lower bound for the account subsidy decay
    pub rd_min_decay: u32,
    /// Upper bound for the account subsidy decay
    pub rd_max_decay: u32,
    /// Equihash `n` parameter
    pub equihash_n: u32,
    /// Equihash `k` parameter
    pub equihash_k: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            percent_100: 10_000,
            max_authority_membership: 10,
            min_account_name_length: 3,
            max_account_name_length: 16,
            max_permlink_length: 256,
            max_memo_size: 2048,
            max_comment_title_size: 256,
            max_witness_url_length: 2048,
            max_custom_id_length: 32,
            max_beneficiaries: 127,
            max_votable_assets: 2,
            min_account_creation_fee: 1,
            max_account_creation_fee: 1_000_000_000_000,
            min_block_size_limit: 65_536,
            rd_min_budget: 1,
            rd_max_budget: i32::MAX,
            rd_min_decay: 1 << 6,
            rd_max_decay: u32::MAX,
            equihash_n: 140,
            equihash_k: 6,
        }
    }
}

impl ProtocolConfig {
    /// Parse a TOML document; missing keys fall back to the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| ValidationError::config(format!("unparseable config: {e}")))?;
        config.validate()?;
        tracing::debug!(
            equihash_n = config.equihash_n,
            equihash_k = config.equihash_k,
            "Loaded protocol config"
        );
        Ok(config)
    }

    /// Check that the constants are mutually consistent.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.percent_100 > 0,
            ValidationError::config("percent_100 must be positive")
        );
        ensure!(
            self.max_authority_membership > 0,
            ValidationError::config("max_authority_membership must be positive")
        );
        ensure!(
            self.min_account_name_length <= self.max_account_name_length,
            ValidationError::config("account name length bounds are inverted")
        );
        // Serialized beneficiary counts must fit in one byte.
        ensure!(
            self.max_beneficiaries < 128,
            ValidationError::config("max_beneficiaries must be below 128")
        );
        ensure!(
            self.min_account_creation_fee >= 0
                && self.min_account_creation_fee <= self.max_account_creation_fee,
            ValidationError::config("account creation fee bounds are inverted")
        );
        ensure!(
            self.rd_min_budget <= self.rd_max_budget,
            ValidationError::config("account subsidy budget bounds are inverted")
        );
        ensure!(
            self.rd_min_decay <= self.rd_max_decay,
            ValidationError::config("account subsidy decay bounds are inverted")
        );
        self.validate_equihash()
    }

    fn validate_equihash(&self) -> Result<()> {
        let (n, k) = (self.equihash_n, self.equihash_k);
        ensure!(
            k >= 1 && n > 0,
            ValidationError::config(format!("equihash ({n}, {k}) is degenerate"))
        );
        ensure!(
            n % (k + 1) == 0,
            ValidationError::config(format!("equihash n={n} is not a multiple of k+1={}", k + 1))
        );
        let collision_bits = n / (k + 1);
        ensure!(
            collision_bits > 0 && collision_bits < 32 && k <= 16,
            ValidationError::config(format!(
                "equihash ({n}, {k}) exceeds supported collision width"
            ))
        );
        Ok(())
    }
}
