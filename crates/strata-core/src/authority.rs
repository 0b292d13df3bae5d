//! Weighted threshold multi-signature authorities
//!
//! An authority is satisfied once the combined weight of the accounts and
//! keys that approve reaches `weight_threshold`. Validation here is purely
//! structural; whether the members actually signed is decided elsewhere.

use crate::config::ProtocolConfig;
use crate::crypto::PublicKey;
use crate::ensure;
use crate::errors::{Result, ValidationError};
use crate::names::{validate_account_name, AccountName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight contributed by one member
pub type Weight = u16;

/// Threshold structure over account and key members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    /// Minimum combined weight required
    pub weight_threshold: u32,
    /// Account members and their weights
    pub account_auths: BTreeMap<AccountName, Weight>,
    /// Key members and their weights
    pub key_auths: BTreeMap<PublicKey, Weight>,
}

impl Authority {
    /// Authority with the given threshold and no members
    pub fn new(weight_threshold: u32) -> Self {
        Self {
            weight_threshold,
            ..Self::default()
        }
    }

    /// Single key that alone satisfies the threshold
    pub fn single_key(key: PublicKey) -> Self {
        Self::new(1).with_key(key, 1)
    }

    /// Add or replace an account member
    pub fn with_account(mut self, account: impl Into<AccountName>, weight: Weight) -> Self {
        self.account_auths.insert(account.into(), weight);
        self
    }

    /// Add or replace a key member
    pub fn with_key(mut self, key: PublicKey, weight: Weight) -> Self {
        self.key_auths.insert(key, weight);
        self
    }

    /// Distinct members across both maps
    pub fn num_auths(&self) -> usize {
        self.account_auths.len() + self.key_auths.len()
    }

    /// Highest weight the members can ever contribute together
    pub fn max_attainable_weight(&self) -> u64 {
        self.account_auths
            .values()
            .chain(self.key_auths.values())
            .map(|w| u64::from(*w))
            .sum()
    }

    /// No combination of members can reach the threshold
    pub fn is_impossible(&self) -> bool {
        self.max_attainable_weight() < u64::from(self.weight_threshold)
    }

    /// Membership cap, account member grammar, and a non-zero threshold whenever members exist
    pub fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        let members = self.num_auths();
        ensure!(
            members <= config.max_authority_membership,
            ValidationError::range(
                "authority",
                format!(
                    "membership exceeded. Max: {} Current: {members}",
                    config.max_authority_membership
                )
            )
        );
        ensure!(
            members == 0 || self.weight_threshold > 0,
            ValidationError::range("authority.weight_threshold", "must be positive when members exist")
        );
        for account in self.account_auths.keys() {
            validate_account_name("authority.account_auths", account, config)?;
        }
        Ok(())
    }
}
