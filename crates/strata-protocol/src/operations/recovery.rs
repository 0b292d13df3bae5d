//! Account recovery and reset
//!
//! A compromised owner authority can be replaced with help from the
//! account's recovery partner, provided the caller proves knowledge of a
//! recently valid owner authority.

use super::Validate;
use crate::extensions::FutureExtension;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, validate_optional_account_name, AccountName, Authority,
    ProtocolConfig, Result, ValidationError,
};

/// Reject owner authorities that can never or always be satisfied
fn require_usable_owner(field: &str, authority: &Authority) -> Result<()> {
    ensure!(
        !authority.is_impossible(),
        ValidationError::structural(format!("{field} cannot be impossible"))
    );
    ensure!(
        authority.weight_threshold > 0,
        ValidationError::structural(format!("{field} cannot be trivial"))
    );
    Ok(())
}

/// Recovery partner proposes a new owner authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestAccountRecoveryOperation {
    /// Recovery partner
    pub recovery_account: AccountName,
    /// Account being recovered
    pub account_to_recover: AccountName,
    /// Proposed owner authority
    pub new_owner_authority: Authority,
    /// Reserved
    pub extensions: Vec<FutureExtension>,
}

impl Validate for RequestAccountRecoveryOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("recovery_account", &self.recovery_account, config)?;
        validate_account_name("account_to_recover", &self.account_to_recover, config)?;
        self.new_owner_authority.validate(config)
    }
}

/// Account holder completes a recovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverAccountOperation {
    /// Account being recovered
    pub account_to_recover: AccountName,
    /// Owner authority requested by the recovery partner
    pub new_owner_authority: Authority,
    /// Owner authority valid within the recovery window
    pub recent_owner_authority: Authority,
    /// Reserved
    pub extensions: Vec<FutureExtension>,
}

impl Validate for RecoverAccountOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account_to_recover", &self.account_to_recover, config)?;
        ensure!(
            self.new_owner_authority != self.recent_owner_authority,
            ValidationError::structural(
                "cannot set new owner authority to the recent owner authority"
            )
        );
        ensure!(
            !self.new_owner_authority.is_impossible(),
            ValidationError::structural("new owner authority cannot be impossible")
        );
        ensure!(
            !self.recent_owner_authority.is_impossible(),
            ValidationError::structural("recent owner authority cannot be impossible")
        );
        ensure!(
            self.new_owner_authority.weight_threshold > 0,
            ValidationError::structural("new owner authority cannot be trivial")
        );
        self.new_owner_authority.validate(config)?;
        self.recent_owner_authority.validate(config)
    }
}

/// Nominate a different recovery partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecoveryAccountOperation {
    /// Account changing partner
    pub account_to_recover: AccountName,
    /// New recovery partner
    pub new_recovery_account: AccountName,
    /// Reserved
    pub extensions: Vec<FutureExtension>,
}

impl Validate for ChangeRecoveryAccountOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account_to_recover", &self.account_to_recover, config)?;
        validate_account_name("new_recovery_account", &self.new_recovery_account, config)
    }
}

/// Reset account replaces the owner authority of an inactive account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAccountOperation {
    /// Designated reset account
    pub reset_account: AccountName,
    /// Account being reset
    pub account_to_reset: AccountName,
    /// Replacement owner authority
    pub new_owner_authority: Authority,
}

impl Validate for ResetAccountOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("reset_account", &self.reset_account, config)?;
        validate_account_name("account_to_reset", &self.account_to_reset, config)?;
        require_usable_owner("new owner authority", &self.new_owner_authority)?;
        self.new_owner_authority.validate(config)
    }
}

/// Designate a different reset account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResetAccountOperation {
    /// Account changing its reset account
    pub account: AccountName,
    /// Reset account being replaced; empty when none is set
    pub current_reset_account: AccountName,
    /// New reset account
    pub reset_account: AccountName,
}

impl Validate for SetResetAccountOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account", &self.account, config)?;
        validate_optional_account_name(
            "current_reset_account",
            &self.current_reset_account,
            config,
        )?;
        validate_account_name("reset_account", &self.reset_account, config)?;
        ensure!(
            self.current_reset_account != self.reset_account,
            ValidationError::structural("new reset account cannot be current reset account")
        );
        Ok(())
    }
}

/// Give up or reclaim governance voting rights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclineVotingRightsOperation {
    /// Account
    pub account: AccountName,
    /// Decline when set, cancel a pending decline otherwise
    pub decline: bool,
}

impl Validate for DeclineVotingRightsOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account", &self.account, config)
    }
}
