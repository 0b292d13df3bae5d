//! Optional operation side data
//!
//! Extensions are validated on their own terms; the carrying operation only
//! asks each one to validate itself.

use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, AccountName, ProtocolConfig, Result, ValidationError,
};

#[cfg(feature = "smt")]
use std::collections::BTreeMap;
#[cfg(feature = "smt")]
use strata_core::{Symbol, SymbolSpace};

/// Placeholder for extension slots that carry nothing yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FutureExtension {
    /// Empty extension
    Void,
}

/// Fail unless an operation's reserved extension slot is empty
pub(crate) fn require_no_extensions(operation: &str, extensions: &[FutureExtension]) -> Result<()> {
    ensure!(
        extensions.is_empty(),
        ValidationError::structural(format!("there are no extensions for {operation}"))
    );
    Ok(())
}

/// Share of a comment's author reward routed to another account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryRoute {
    /// Receiving account
    pub account: AccountName,
    /// Share in hundredths of a percent
    pub weight: u16,
}

impl BeneficiaryRoute {
    /// Route `weight` of the reward to `account`
    pub fn new(account: impl Into<AccountName>, weight: u16) -> Self {
        Self {
            account: account.into(),
            weight,
        }
    }
}

/// Beneficiaries of a comment's payout, sorted by account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPayoutBeneficiaries {
    /// Routes in strictly ascending account order
    pub beneficiaries: Vec<BeneficiaryRoute>,
}

impl CommentPayoutBeneficiaries {
    /// Non-empty, bounded, each share and the running total within 100%,
    /// accounts strictly ascending
    pub fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        ensure!(
            !self.beneficiaries.is_empty(),
            ValidationError::range("beneficiaries", "must specify at least one beneficiary")
        );
        ensure!(
            self.beneficiaries.len() <= config.max_beneficiaries,
            ValidationError::range(
                "beneficiaries",
                format!(
                    "cannot specify more than {} beneficiaries",
                    config.max_beneficiaries
                )
            )
        );

        let percent_100 = u32::from(config.percent_100);
        let mut sum = 0u32;
        let mut previous: Option<&BeneficiaryRoute> = None;
        for route in &self.beneficiaries {
            validate_account_name("beneficiaries.account", &route.account, config)?;
            ensure!(
                u32::from(route.weight) <= percent_100,
                ValidationError::range(
                    "beneficiaries.weight",
                    "cannot allocate more than 100% of rewards to one account"
                )
            );
            sum += u32::from(route.weight);
            ensure!(
                sum <= percent_100,
                ValidationError::range(
                    "beneficiaries.weight",
                    "cannot allocate more than 100% of rewards to a comment"
                )
            );
            if let Some(prev) = previous {
                ensure!(
                    prev.account < route.account,
                    ValidationError::structural(
                        "beneficiaries must be specified in sorted order (account ascending)"
                    )
                );
            }
            previous = Some(route);
        }
        Ok(())
    }
}

/// Voting terms for one user-issued token
#[cfg(feature = "smt")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotableAssetInfo {
    /// Largest payout the comment accepts in this token
    pub max_accepted_payout: i64,
    /// Whether curators earn rewards in this token
    pub allow_curation_rewards: bool,
}

/// User-issued tokens whose holders may vote on a comment
#[cfg(feature = "smt")]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedVoteAssets {
    /// Terms keyed by liquid token symbol
    pub votable_assets: BTreeMap<Symbol, VotableAssetInfo>,
}

#[cfg(feature = "smt")]
impl AllowedVoteAssets {
    /// Bounded count of liquid NAI-space tokens with non-negative payout caps
    pub fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        ensure!(
            self.votable_assets.len() <= config.max_votable_assets,
            ValidationError::range(
                "votable_assets",
                format!(
                    "cannot specify more than {} votable assets",
                    config.max_votable_assets
                )
            )
        );
        for (symbol, info) in &self.votable_assets {
            ensure!(
                symbol.space() == SymbolSpace::Nai && !symbol.is_staked(),
                ValidationError::type_mismatch("votable_assets", "a liquid NAI token", symbol)
            );
            symbol.validate()?;
            ensure!(
                info.max_accepted_payout >= 0,
                ValidationError::range(
                    "votable_assets.max_accepted_payout",
                    "cannot accept less than 0 payout"
                )
            );
        }
        Ok(())
    }
}

/// Side data attachable to comment options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentOptionsExtension {
    /// Reward routing
    CommentPayoutBeneficiaries(CommentPayoutBeneficiaries),
    /// User-issued vote tokens
    #[cfg(feature = "smt")]
    AllowedVoteAssets(AllowedVoteAssets),
}

impl CommentOptionsExtension {
    /// Validate whichever extension this is
    pub fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        match self {
            CommentOptionsExtension::CommentPayoutBeneficiaries(beneficiaries) => {
                beneficiaries.validate(config)
            }
            #[cfg(feature = "smt")]
            CommentOptionsExtension::AllowedVoteAssets(assets) => assets.validate(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strata_testkit::test_config;

    fn routes(entries: &[(&str, u16)]) -> CommentPayoutBeneficiaries {
        CommentPayoutBeneficiaries {
            beneficiaries: entries
                .iter()
                .map(|(account, weight)| BeneficiaryRoute::new(*account, *weight))
                .collect(),
        }
    }

    #[test]
    fn test_sorted_routes_within_budget() {
        let list = routes(&[("alice", 2_500), ("bob", 2_500), ("carol", 5_000)]);
        assert!(list.validate(&test_config()).is_ok());
    }

    #[test]
    fn test_empty_and_oversized_lists() {
        assert_matches!(routes(&[]).validate(&test_config()), Err(ValidationError::Range { .. }));

        let names: Vec<String> = (0..128).map(|i| format!("user{i:03}")).collect();
        let list = CommentPayoutBeneficiaries {
            beneficiaries: names.iter().map(|n| BeneficiaryRoute::new(n.as_str(), 1)).collect(),
        };
        assert_matches!(list.validate(&test_config()), Err(ValidationError::Range { .. }));

        let list = CommentPayoutBeneficiaries {
            beneficiaries: list.beneficiaries[..127].to_vec(),
        };
        assert!(list.validate(&test_config()).is_ok());
    }

    #[test]
    fn test_total_over_100_percent() {
        let list = routes(&[("alice", 6_000), ("bob", 4_001)]);
        assert_matches!(list.validate(&test_config()), Err(ValidationError::Range { .. }));
        let list = routes(&[("alice", 10_001)]);
        assert_matches!(list.validate(&test_config()), Err(ValidationError::Range { .. }));
    }

    #[test]
    fn test_order_and_duplicates() {
        let unsorted = routes(&[("bob", 1), ("alice", 1)]);
        assert_matches!(unsorted.validate(&test_config()), Err(ValidationError::Structural { .. }));
        let duplicate = routes(&[("alice", 1), ("alice", 1)]);
        assert_matches!(duplicate.validate(&test_config()), Err(ValidationError::Structural { .. }));
    }

    #[test]
    fn test_extension_dispatch() {
        let ext = CommentOptionsExtension::CommentPayoutBeneficiaries(routes(&[("Alice", 1)]));
        assert_matches!(ext.validate(&test_config()), Err(ValidationError::Grammar { .. }));
    }

    #[test]
    fn test_reserved_extensions_must_be_empty() {
        assert!(require_no_extensions("claim_account", &[]).is_ok());
        assert!(require_no_extensions("claim_account", &[FutureExtension::Void]).is_err());
    }

    #[cfg(feature = "smt")]
    #[test]
    fn test_allowed_vote_assets() {
        let info = VotableAssetInfo {
            max_accepted_payout: 10,
            allow_curation_rewards: true,
        };
        let mut assets = AllowedVoteAssets::default();
        assets.votable_assets.insert(Symbol::smt(21, 3), info.clone());
        assert!(assets.validate(&test_config()).is_ok());

        let mut staked = AllowedVoteAssets::default();
        staked.votable_assets.insert(Symbol::smt_staked(21, 3), info.clone());
        assert_matches!(staked.validate(&test_config()), Err(ValidationError::TypeMismatch { .. }));

        let mut core = AllowedVoteAssets::default();
        core.votable_assets.insert(Symbol::Liquid, info);
        assert!(core.validate(&test_config()).is_err());
    }
}
