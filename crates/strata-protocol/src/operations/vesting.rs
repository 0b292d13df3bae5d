//! Staking, unstaking and delegation of stake

use super::checks::{require_non_negative, require_percent, require_positive};
use super::Validate;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, validate_optional_account_name, AccountName, Asset,
    ProtocolConfig, Result, Symbol, SymbolSpace, ValidationError,
};

/// Convert liquid tokens into stake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferToVestingOperation {
    /// Funding account
    pub from: AccountName,
    /// Account receiving the stake; empty means `from`
    pub to: AccountName,
    /// Liquid amount staked
    pub amount: Asset,
}

impl Validate for TransferToVestingOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("from", &self.from, config)?;
        let symbol = self.amount.symbol;
        ensure!(
            symbol == Symbol::Liquid || (symbol.space() == SymbolSpace::Nai && !symbol.is_staked()),
            ValidationError::type_mismatch("amount", "STR or a liquid NAI token", symbol)
        );
        validate_optional_account_name("to", &self.to, config)?;
        require_positive("amount", &self.amount)
    }
}

/// Begin unstaking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawVestingOperation {
    /// Unstaking account
    pub account: AccountName,
    /// Stake to withdraw over the withdrawal period
    pub vesting_shares: Asset,
}

impl Validate for WithdrawVestingOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account", &self.account, config)?;
        self.vesting_shares
            .require_symbol("vesting_shares", Symbol::Staked)
    }
}

/// Route part of each unstaking payment to another account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetWithdrawVestingRouteOperation {
    /// Unstaking account
    pub from_account: AccountName,
    /// Receiving account
    pub to_account: AccountName,
    /// Share routed, in hundredths of a percent
    pub percent: u16,
    /// Re-stake the routed share on arrival
    pub auto_vest: bool,
}

impl Validate for SetWithdrawVestingRouteOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("from_account", &self.from_account, config)?;
        validate_account_name("to_account", &self.to_account, config)?;
        require_percent("percent", self.percent, config)
    }
}

/// Lend stake to another account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateVestingSharesOperation {
    /// Lending account
    pub delegator: AccountName,
    /// Borrowing account
    pub delegatee: AccountName,
    /// Total stake delegated; zero removes the delegation
    pub vesting_shares: Asset,
}

impl Validate for DelegateVestingSharesOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("delegator", &self.delegator, config)?;
        validate_account_name("delegatee", &self.delegatee, config)?;
        ensure!(
            self.delegator != self.delegatee,
            ValidationError::structural("cannot delegate stake to yourself")
        );
        self.vesting_shares
            .require_symbol("vesting_shares", Symbol::Staked)?;
        require_non_negative("vesting_shares", &self.vesting_shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strata_testkit::{liquid, pegged, staked, test_config};

    #[test]
    fn test_transfer_to_vesting() {
        let config = test_config();
        let op = TransferToVestingOperation {
            from: "alice".into(),
            to: String::new(),
            amount: liquid(100),
        };
        assert!(op.validate(&config).is_ok());

        let smt = TransferToVestingOperation { amount: Asset::new(5, Symbol::smt(21, 3)), ..op.clone() };
        assert!(smt.validate(&config).is_ok());

        let smt_staked = TransferToVestingOperation {
            amount: Asset::new(5, Symbol::smt_staked(21, 3)),
            ..op.clone()
        };
        assert_matches!(smt_staked.validate(&config), Err(ValidationError::TypeMismatch { .. }));

        let dollars = TransferToVestingOperation { amount: pegged(100), ..op.clone() };
        assert_matches!(dollars.validate(&config), Err(ValidationError::TypeMismatch { .. }));

        let zero = TransferToVestingOperation { amount: liquid(0), ..op.clone() };
        assert_matches!(zero.validate(&config), Err(ValidationError::Range { .. }));

        let bad_to = TransferToVestingOperation { to: "B".into(), ..op };
        assert_matches!(bad_to.validate(&config), Err(ValidationError::Grammar { .. }));
    }

    #[test]
    fn test_withdraw_and_route() {
        let config = test_config();
        let withdraw = WithdrawVestingOperation {
            account: "alice".into(),
            vesting_shares: liquid(1),
        };
        assert_matches!(withdraw.validate(&config), Err(ValidationError::TypeMismatch { .. }));

        let route = SetWithdrawVestingRouteOperation {
            from_account: "alice".into(),
            to_account: "bob".into(),
            percent: 10_001,
            auto_vest: false,
        };
        assert_matches!(route.validate(&config), Err(ValidationError::Range { .. }));
    }

    #[test]
    fn test_delegation() {
        let config = test_config();
        let op = DelegateVestingSharesOperation {
            delegator: "alice".into(),
            delegatee: "bob".into(),
            vesting_shares: staked(0),
        };
        assert!(op.validate(&config).is_ok());

        let self_delegation = DelegateVestingSharesOperation { delegatee: "alice".into(), ..op.clone() };
        assert_matches!(self_delegation.validate(&config), Err(ValidationError::Structural { .. }));

        let negative = DelegateVestingSharesOperation { vesting_shares: staked(-1), ..op };
        assert_matches!(negative.validate(&config), Err(ValidationError::Range { .. }));
    }
}
