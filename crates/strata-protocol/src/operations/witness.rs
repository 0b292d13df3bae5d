//! Witness registration, property updates and voting

use super::Validate;
use crate::chain_properties::ChainProperties;
use crate::extensions::FutureExtension;
use crate::witness_props::{validate_witness_properties, validate_witness_url, WitnessProperties};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strata_core::{
    ensure, validate_account_name, validate_optional_account_name, AccountName, Asset,
    ProtocolConfig, PublicKey, Result, Symbol, Text, ValidationError,
};

/// Register or update a witness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessUpdateOperation {
    /// Witness account
    pub owner: AccountName,
    /// Witness announcement URL
    pub url: Text,
    /// Key blocks will be signed with
    pub block_signing_key: PublicKey,
    /// Proposed chain parameters
    pub props: ChainProperties,
    /// Registration fee
    pub fee: Asset,
}

impl Validate for WitnessUpdateOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("owner", &self.owner, config)?;
        validate_witness_url("url", self.url.as_bytes(), config)?;
        ensure!(
            self.fee.try_cmp(&Asset::zero(Symbol::Liquid))? != Ordering::Less,
            ValidationError::range("fee", "fee cannot be negative")
        );
        self.props.validate(config, false)
    }
}

/// Update witness properties through the key-addressed map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessSetPropertiesOperation {
    /// Witness account
    pub owner: AccountName,
    /// Encoded properties by name
    pub props: WitnessProperties,
    /// Reserved
    pub extensions: Vec<FutureExtension>,
}

impl Validate for WitnessSetPropertiesOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("owner", &self.owner, config)?;
        validate_witness_properties(&self.props, config)
    }
}

/// Approve or unapprove a witness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountWitnessVoteOperation {
    /// Voting account
    pub account: AccountName,
    /// Witness voted on
    pub witness: AccountName,
    /// Approve when set, remove approval otherwise
    pub approve: bool,
}

impl Validate for AccountWitnessVoteOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account", &self.account, config)?;
        validate_account_name("witness", &self.witness, config)
    }
}

/// Let another account cast witness votes on this account's behalf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountWitnessProxyOperation {
    /// Delegating account
    pub account: AccountName,
    /// Proxy; empty clears it
    pub proxy: AccountName,
}

impl Validate for AccountWitnessProxyOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("account", &self.account, config)?;
        validate_optional_account_name("proxy", &self.proxy, config)?;
        ensure!(
            self.proxy != self.account,
            ValidationError::structural("cannot proxy to self")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness_props::encode_property;
    use assert_matches::assert_matches;
    use strata_testkit::{liquid, pegged, test_config, test_public_key};

    fn update() -> WitnessUpdateOperation {
        WitnessUpdateOperation {
            owner: "witness".into(),
            url: Text::from("https://strata.example/witness"),
            block_signing_key: test_public_key(1),
            props: ChainProperties {
                account_creation_fee: liquid(1_000),
                maximum_block_size: 65_536,
                pegged_interest_rate: 0,
            },
            fee: liquid(0),
        }
    }

    #[test]
    fn test_witness_update() {
        let config = test_config();
        assert!(update().validate(&config).is_ok());

        let no_url = WitnessUpdateOperation { url: Text::default(), ..update() };
        assert_matches!(no_url.validate(&config), Err(ValidationError::Range { .. }));

        let long_url = WitnessUpdateOperation {
            url: Text::from("u".repeat(config.max_witness_url_length + 1)),
            ..update()
        };
        assert_matches!(long_url.validate(&config), Err(ValidationError::Range { .. }));

        let negative = WitnessUpdateOperation { fee: liquid(-1), ..update() };
        assert_matches!(negative.validate(&config), Err(ValidationError::Range { .. }));

        let pegged_fee = WitnessUpdateOperation { fee: pegged(0), ..update() };
        assert_matches!(pegged_fee.validate(&config), Err(ValidationError::TypeMismatch { .. }));
    }

    #[test]
    fn test_witness_update_rejects_out_of_range_props() {
        let config = test_config();

        let mut small_blocks = update();
        small_blocks.props.maximum_block_size = config.min_block_size_limit - 1;
        assert_matches!(
            small_blocks.validate(&config),
            Err(ValidationError::Range { field, .. }) if field == "props.maximum_block_size"
        );

        let mut cheap_accounts = update();
        cheap_accounts.props.account_creation_fee = liquid(config.min_account_creation_fee - 1);
        assert_matches!(
            cheap_accounts.validate(&config),
            Err(ValidationError::Range { field, .. }) if field == "props.account_creation_fee"
        );

        let mut high_interest = update();
        high_interest.props.pegged_interest_rate = config.percent_100 + 1;
        assert_matches!(high_interest.validate(&config), Err(ValidationError::Range { .. }));
    }

    #[test]
    fn test_witness_update_accepts_non_canonical_fee_symbol() {
        let mut op = update();
        op.props.account_creation_fee = pegged(1_000);
        assert!(op.validate(&test_config()).is_ok());
    }

    #[test]
    fn test_set_properties_requires_key() {
        let config = test_config();
        let mut op = WitnessSetPropertiesOperation {
            owner: "witness".into(),
            props: WitnessProperties::new(),
            extensions: vec![],
        };
        assert!(op.validate(&config).is_err());
        op.props
            .insert("key".into(), encode_property(&test_public_key(2)).unwrap());
        assert!(op.validate(&config).is_ok());
    }

    #[test]
    fn test_proxy() {
        let config = test_config();
        let clear = AccountWitnessProxyOperation {
            account: "alice".into(),
            proxy: String::new(),
        };
        assert!(clear.validate(&config).is_ok());
        let own = AccountWitnessProxyOperation {
            account: "alice".into(),
            proxy: "alice".into(),
        };
        assert_matches!(own.validate(&config), Err(ValidationError::Structural { .. }));
    }

    #[test]
    fn test_witness_vote() {
        let op = AccountWitnessVoteOperation {
            account: "alice".into(),
            witness: "w".into(),
            approve: true,
        };
        assert_matches!(op.validate(&test_config()), Err(ValidationError::Grammar { .. }));
    }
}
