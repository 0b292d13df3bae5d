//! Witness-proposed chain parameters

use serde::{Deserialize, Serialize};
use strata_core::{ensure, Asset, ProtocolConfig, Result, Symbol, ValidationError};

/// Parameters each witness votes on through its updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProperties {
    /// Fee charged to create an account
    pub account_creation_fee: Asset,
    /// Largest block the witness will accept
    pub maximum_block_size: u32,
    /// Interest paid on pegged balances, in hundredths of a percent
    pub pegged_interest_rate: u16,
}

impl ChainProperties {
    /// Check the proposal against network minimums.
    ///
    /// With `force_canon` the fee must also be denominated in the liquid
    /// token; mining operations require this, witness updates do not.
    pub fn validate(&self, config: &ProtocolConfig, force_canon: bool) -> Result<()> {
        if force_canon {
            self.account_creation_fee
                .require_symbol("props.account_creation_fee", Symbol::Liquid)?;
        }
        ensure!(
            self.account_creation_fee.amount >= config.min_account_creation_fee,
            ValidationError::range(
                "props.account_creation_fee",
                format!("below minimum of {}", config.min_account_creation_fee)
            )
        );
        ensure!(
            self.maximum_block_size >= config.min_block_size_limit,
            ValidationError::range(
                "props.maximum_block_size",
                format!("below minimum of {}", config.min_block_size_limit)
            )
        );
        ensure!(
            self.pegged_interest_rate <= config.percent_100,
            ValidationError::range("props.pegged_interest_rate", "must not exceed 100%")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_testkit::{liquid, pegged, test_config};

    fn props() -> ChainProperties {
        ChainProperties {
            account_creation_fee: liquid(3_000),
            maximum_block_size: 131_072,
            pegged_interest_rate: 1_000,
        }
    }

    #[test]
    fn test_valid_properties() {
        assert!(props().validate(&test_config(), true).is_ok());
    }

    #[test]
    fn test_canonical_fee_symbol() {
        let p = ChainProperties {
            account_creation_fee: pegged(3_000),
            ..props()
        };
        assert!(p.validate(&test_config(), false).is_ok());
        assert!(matches!(
            p.validate(&test_config(), true),
            Err(ValidationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_bounds() {
        let config = test_config();
        let low_fee = ChainProperties {
            account_creation_fee: liquid(0),
            ..props()
        };
        assert!(low_fee.validate(&config, true).is_err());
        let small_block = ChainProperties {
            maximum_block_size: 1_024,
            ..props()
        };
        assert!(small_block.validate(&config, true).is_err());
        let usurious = ChainProperties {
            pegged_interest_rate: 10_001,
            ..props()
        };
        assert!(usurious.validate(&config, true).is_err());
    }
}
