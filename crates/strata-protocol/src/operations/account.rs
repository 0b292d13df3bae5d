//! Account creation and maintenance

use super::checks::require_non_negative;
use super::Validate;
use crate::extensions::{require_no_extensions, FutureExtension};
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, validate_json_metadata, AccountName, Asset, Authority,
    ProtocolConfig, PublicKey, Result, Symbol, Text, ValidationError,
};

/// Create an account by paying the creation fee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateOperation {
    /// Fee paid by the creator
    pub fee: Asset,
    /// Paying account
    pub creator: AccountName,
    /// Name of the account being created
    pub new_account_name: AccountName,
    /// Owner authority
    pub owner: Authority,
    /// Active authority
    pub active: Authority,
    /// Posting authority
    pub posting: Authority,
    /// Memo encryption key
    pub memo_key: PublicKey,
    /// Free-form JSON profile
    pub json_metadata: Text,
}

impl Validate for AccountCreateOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("new_account_name", &self.new_account_name, config)?;
        self.fee.require_symbol("fee", Symbol::Liquid)?;
        self.owner.validate(config)?;
        self.active.validate(config)?;
        validate_json_metadata("json_metadata", &self.json_metadata)?;
        require_non_negative("fee", &self.fee)
    }
}

/// Create an account and delegate stake to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateWithDelegationOperation {
    /// Fee paid by the creator
    pub fee: Asset,
    /// Staked tokens lent to the new account
    pub delegation: Asset,
    /// Paying account
    pub creator: AccountName,
    /// Name of the account being created
    pub new_account_name: AccountName,
    /// Owner authority
    pub owner: Authority,
    /// Active authority
    pub active: Authority,
    /// Posting authority
    pub posting: Authority,
    /// Memo encryption key
    pub memo_key: PublicKey,
    /// Free-form JSON profile
    pub json_metadata: Text,
    /// Reserved
    pub extensions: Vec<FutureExtension>,
}

impl Validate for AccountCreateWithDelegationOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("new_account_name", &self.new_account_name, config)?;
        validate_account_name("creator", &self.creator, config)?;
        self.fee.require_symbol("fee", Symbol::Liquid)?;
        self.delegation.require_symbol("delegation", Symbol::Staked)?;
        self.owner.validate(config)?;
        self.active.validate(config)?;
        self.posting.validate(config)?;
        validate_json_metadata("json_metadata", &self.json_metadata)?;
        require_non_negative("fee", &self.fee)?;
        require_non_negative("delegation", &self.delegation)
    }
}

/// Replace an account's authorities, memo key or profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    /// Account being updated
    pub account: AccountName,
    /// New owner authority, if changing
    pub owner: Option<Authority>,
    /// New active authority, if changing
    pub active: Option<Authority>,
    /// New posting authority, if changing
    pub posting: Option<Authority>,
    /// Memo encryption key
    pub memo_key: PublicKey,
    /// Free-form JSON profile
    pub json_metadata: Text,
}

impl Validate for AccountUpdateOperation {
    // Replacement authorities are checked against chain state when applied.
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account", &self.account, config)?;
        validate_json_metadata("json_metadata", &self.json_metadata)
    }
}

/// Pay for an account creation token to redeem later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAccountOperation {
    /// Claiming account
    pub creator: AccountName,
    /// Fee paid; zero claims against the subsidy pool
    pub fee: Asset,
    /// Reserved
    pub extensions: Vec<FutureExtension>,
}

impl Validate for ClaimAccountOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("creator", &self.creator, config)?;
        self.fee.require_symbol("fee", Symbol::Liquid)?;
        require_non_negative("fee", &self.fee)?;
        ensure!(
            self.fee.amount <= config.max_account_creation_fee,
            ValidationError::range("fee", "account creation fee cannot be too large")
        );
        require_no_extensions("claim_account", &self.extensions)
    }
}

/// Redeem a claimed account creation token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateClaimedAccountOperation {
    /// Account holding the token
    pub creator: AccountName,
    /// Name of the account being created
    pub new_account_name: AccountName,
    /// Owner authority
    pub owner: Authority,
    /// Active authority
    pub active: Authority,
    /// Posting authority
    pub posting: Authority,
    /// Memo encryption key
    pub memo_key: PublicKey,
    /// Free-form JSON profile
    pub json_metadata: Text,
    /// Reserved
    pub extensions: Vec<FutureExtension>,
}

impl Validate for CreateClaimedAccountOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("creator", &self.creator, config)?;
        validate_account_name("new_account_name", &self.new_account_name, config)?;
        self.owner.validate(config)?;
        self.active.validate(config)?;
        self.posting.validate(config)?;
        validate_json_metadata("json_metadata", &self.json_metadata)?;
        require_no_extensions("create_claimed_account", &self.extensions)
    }
}
