//! Reward balance claims

use super::checks::require_non_negative;
use super::Validate;
use crate::extensions::FutureExtension;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, AccountName, Asset, ProtocolConfig, Result, Symbol,
    ValidationError,
};

/// Move pending rewards in the three core tokens into the account balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRewardBalanceOperation {
    /// Claiming account
    pub account: AccountName,
    /// Liquid reward claimed
    pub reward_liquid: Asset,
    /// Pegged reward claimed
    pub reward_pegged: Asset,
    /// Staked reward claimed
    pub reward_staked: Asset,
}

impl Validate for ClaimRewardBalanceOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account", &self.account, config)?;
        self.reward_liquid
            .require_symbol("reward_liquid", Symbol::Liquid)?;
        self.reward_pegged
            .require_symbol("reward_pegged", Symbol::Pegged)?;
        self.reward_staked
            .require_symbol("reward_staked", Symbol::Staked)?;
        require_non_negative("reward_liquid", &self.reward_liquid)?;
        require_non_negative("reward_pegged", &self.reward_pegged)?;
        require_non_negative("reward_staked", &self.reward_staked)?;
        ensure!(
            self.reward_liquid.amount > 0
                || self.reward_pegged.amount > 0
                || self.reward_staked.amount > 0,
            ValidationError::range("reward", "must claim something")
        );
        Ok(())
    }
}

/// Claim rewards in any number of tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRewardBalance2Operation {
    /// Claiming account
    pub account: AccountName,
    /// Reserved
    pub extensions: Vec<FutureExtension>,
    /// Claimed amounts, strictly ascending by numeric symbol id
    pub reward_tokens: Vec<Asset>,
}

impl Validate for ClaimRewardBalance2Operation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account", &self.account, config)?;
        let Some(first) = self.reward_tokens.first() else {
            return Err(ValidationError::range("reward_tokens", "must claim something"));
        };
        require_non_negative("reward_tokens", first)?;
        let mut substantial = first.amount > 0;
        for pair in self.reward_tokens.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            ensure!(
                left.symbol.to_nai() <= right.symbol.to_nai(),
                ValidationError::structural(
                    "reward tokens have not been inserted in ascending order"
                )
            );
            ensure!(
                left.symbol.to_nai() != right.symbol.to_nai(),
                ValidationError::structural(format!(
                    "duplicate symbol {} inserted into claim reward operation container",
                    left.symbol
                ))
            );
            require_non_negative("reward_tokens", right)?;
            substantial |= right.amount > 0;
        }
        ensure!(
            substantial,
            ValidationError::range("reward_tokens", "must claim something")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strata_testkit::{liquid, pegged, staked, test_config};

    #[test]
    fn test_claim_reward_balance() {
        let config = test_config();
        let op = ClaimRewardBalanceOperation {
            account: "earner".into(),
            reward_liquid: liquid(0),
            reward_pegged: pegged(0),
            reward_staked: staked(1),
        };
        assert!(op.validate(&config).is_ok());

        let nothing = ClaimRewardBalanceOperation { reward_staked: staked(0), ..op.clone() };
        assert_matches!(nothing.validate(&config), Err(ValidationError::Range { .. }));

        let negative = ClaimRewardBalanceOperation { reward_liquid: liquid(-1), ..op.clone() };
        assert_matches!(negative.validate(&config), Err(ValidationError::Range { .. }));

        let misfiled = ClaimRewardBalanceOperation { reward_pegged: liquid(1), ..op };
        assert_matches!(misfiled.validate(&config), Err(ValidationError::TypeMismatch { .. }));
    }

    #[test]
    fn test_multi_token_ordering() {
        let config = test_config();
        let claim = |tokens: Vec<Asset>| ClaimRewardBalance2Operation {
            account: "earner".into(),
            extensions: vec![],
            reward_tokens: tokens,
        };
        assert!(claim(vec![pegged(0), liquid(1), staked(0)]).validate(&config).is_ok());
        assert_matches!(claim(vec![]).validate(&config), Err(ValidationError::Range { .. }));
        assert_matches!(
            claim(vec![liquid(1), pegged(1)]).validate(&config),
            Err(ValidationError::Structural { .. })
        );
        assert_matches!(
            claim(vec![Asset::new(1, Symbol::smt(21, 3)), Asset::new(1, Symbol::smt_staked(21, 3))])
                .validate(&config),
            Err(ValidationError::Structural { .. })
        );
        assert_matches!(
            claim(vec![pegged(1), liquid(-1)]).validate(&config),
            Err(ValidationError::Range { .. })
        );
        assert_matches!(
            claim(vec![pegged(0), liquid(0)]).validate(&config),
            Err(ValidationError::Range { .. })
        );
    }
}
