//! Liquid transfers, savings and conversions

use super::checks::{require_positive, require_symbol_in, validate_memo};
use super::Validate;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, AccountName, Asset, ProtocolConfig, Result, Symbol, Text,
    ValidationError,
};

/// Move liquid or pegged tokens between accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    /// Sender
    pub from: AccountName,
    /// Recipient
    pub to: AccountName,
    /// Amount sent
    pub amount: Asset,
    /// Note for the recipient
    pub memo: Text,
}

impl Validate for TransferOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("from", &self.from, config)?;
        validate_account_name("to", &self.to, config)?;
        ensure!(
            !self.amount.symbol.is_staked(),
            ValidationError::type_mismatch("amount", "a transferable symbol", self.amount.symbol)
        );
        require_positive("amount", &self.amount)?;
        validate_memo(&self.memo, config)
    }
}

/// Deposit into a savings balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferToSavingsOperation {
    /// Depositor
    pub from: AccountName,
    /// Savings owner
    pub to: AccountName,
    /// Amount deposited
    pub amount: Asset,
    /// Note for the owner
    pub memo: Text,
}

impl Validate for TransferToSavingsOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("from", &self.from, config)?;
        validate_account_name("to", &self.to, config)?;
        require_positive("amount", &self.amount)?;
        require_symbol_in("amount", &self.amount, &[Symbol::Liquid, Symbol::Pegged])?;
        validate_memo(&self.memo, config)
    }
}

/// Start a delayed withdrawal from savings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFromSavingsOperation {
    /// Savings owner
    pub from: AccountName,
    /// Identifier for later cancellation
    pub request_id: u32,
    /// Recipient
    pub to: AccountName,
    /// Amount withdrawn
    pub amount: Asset,
    /// Note for the recipient
    pub memo: Text,
}

impl Validate for TransferFromSavingsOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("from", &self.from, config)?;
        validate_account_name("to", &self.to, config)?;
        require_positive("amount", &self.amount)?;
        require_symbol_in("amount", &self.amount, &[Symbol::Liquid, Symbol::Pegged])?;
        validate_memo(&self.memo, config)
    }
}

/// Cancel a pending savings withdrawal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTransferFromSavingsOperation {
    /// Savings owner
    pub from: AccountName,
    /// Withdrawal being cancelled
    pub request_id: u32,
}

impl Validate for CancelTransferFromSavingsOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("from", &self.from, config)
    }
}

/// Convert pegged tokens into liquid tokens at the median feed price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOperation {
    /// Converting account
    pub owner: AccountName,
    /// Identifier of the conversion request
    pub request_id: u32,
    /// Pegged amount converted
    pub amount: Asset,
}

impl Validate for ConvertOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("owner", &self.owner, config)?;
        self.amount.require_symbol("amount", Symbol::Pegged)?;
        require_positive("amount", &self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strata_testkit::{liquid, pegged, staked, test_config};

    fn transfer(amount: Asset) -> TransferOperation {
        TransferOperation {
            from: "alice".into(),
            to: "bob".into(),
            amount,
            memo: Text::default(),
        }
    }

    #[test]
    fn test_transfer() {
        let config = test_config();
        assert!(transfer(liquid(1)).validate(&config).is_ok());
        assert!(transfer(pegged(1)).validate(&config).is_ok());
        assert_matches!(transfer(liquid(0)).validate(&config), Err(ValidationError::Range { .. }));
        assert_matches!(transfer(liquid(-7)).validate(&config), Err(ValidationError::Range { .. }));
        assert_matches!(transfer(staked(1)).validate(&config), Err(ValidationError::TypeMismatch { .. }));
        assert_matches!(
            transfer(Asset::new(1, Symbol::smt_staked(21, 3))).validate(&config),
            Err(ValidationError::TypeMismatch { .. })
        );
    }

    #[test]
    fn test_memo_limits() {
        let config = test_config();
        let long = TransferOperation {
            memo: Text::from("m".repeat(config.max_memo_size)),
            ..transfer(liquid(1))
        };
        assert_matches!(long.validate(&config), Err(ValidationError::Range { .. }));
        let fits = TransferOperation {
            memo: Text::from("m".repeat(config.max_memo_size - 1)),
            ..transfer(liquid(1))
        };
        assert!(fits.validate(&config).is_ok());
        let binary = TransferOperation {
            memo: Text::from_bytes(vec![0xc0, 0x80]),
            ..transfer(liquid(1))
        };
        assert_matches!(binary.validate(&config), Err(ValidationError::Encoding { .. }));
    }

    #[test]
    fn test_savings() {
        let config = test_config();
        let deposit = TransferToSavingsOperation {
            from: "alice".into(),
            to: "alice".into(),
            amount: pegged(10),
            memo: Text::from("rainy day"),
        };
        assert!(deposit.validate(&config).is_ok());
        let staked_deposit = TransferToSavingsOperation { amount: staked(10), ..deposit };
        assert_matches!(staked_deposit.validate(&config), Err(ValidationError::TypeMismatch { .. }));

        let withdraw = TransferFromSavingsOperation {
            from: "alice".into(),
            request_id: 1,
            to: "bob".into(),
            amount: liquid(0),
            memo: Text::default(),
        };
        assert_matches!(withdraw.validate(&config), Err(ValidationError::Range { .. }));

        let cancel = CancelTransferFromSavingsOperation {
            from: "alice".into(),
            request_id: 1,
        };
        assert!(cancel.validate(&config).is_ok());
    }

    #[test]
    fn test_convert_only_pegged() {
        let config = test_config();
        let op = ConvertOperation {
            owner: "alice".into(),
            request_id: 9,
            amount: pegged(5),
        };
        assert!(op.validate(&config).is_ok());
        let op = ConvertOperation { amount: liquid(5), ..op };
        assert_matches!(op.validate(&config), Err(ValidationError::TypeMismatch { .. }));
    }
}
