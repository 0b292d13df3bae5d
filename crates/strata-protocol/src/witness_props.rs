//! Key-addressed witness properties
//!
//! A witness publishes properties as a map from name to individually
//! encoded bytes. Each recognized name has one entry in [`PROPERTY_CHECKS`]
//! that decodes the value and range-checks it. Unrecognized names are
//! ignored so newer witnesses can publish properties older nodes do not
//! understand.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use strata_core::{
    ensure, require_utf8, Asset, ProtocolConfig, Price, PublicKey, Result, Symbol, Text,
    ValidationError,
};

/// Property name to encoded value
pub type WitnessProperties = BTreeMap<String, Vec<u8>>;

/// Name of the mandatory current signing key property
pub const SIGNING_KEY_PROPERTY: &str = "key";

type PropertyCheck = fn(&[u8], &ProtocolConfig) -> Result<()>;

/// Recognized properties and their checks, in validation order
const PROPERTY_CHECKS: &[(&str, PropertyCheck)] = &[
    (SIGNING_KEY_PROPERTY, check_signing_key),
    ("account_creation_fee", check_account_creation_fee),
    ("maximum_block_size", check_maximum_block_size),
    ("pegged_interest_rate", check_pegged_interest_rate),
    ("new_signing_key", check_signing_key),
    ("pegged_exchange_rate", check_pegged_exchange_rate),
    ("url", check_url),
    ("account_subsidy_budget", check_account_subsidy_budget),
    ("account_subsidy_decay", check_account_subsidy_decay),
];

/// Encode a property value the way [`validate_witness_properties`] decodes it
pub fn encode_property<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| ValidationError::encoding("props", e.to_string()))
}

fn decode<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes)
        .map_err(|e| ValidationError::encoding(format!("props.{name}"), e.to_string()))
}

/// Signing key present, every recognized property decodable and in range
pub fn validate_witness_properties(
    props: &WitnessProperties,
    config: &ProtocolConfig,
) -> Result<()> {
    ensure!(
        props.contains_key(SIGNING_KEY_PROPERTY),
        ValidationError::structural("no signing key provided")
    );
    for (name, check) in PROPERTY_CHECKS {
        if let Some(bytes) = props.get(*name) {
            check(bytes, config)?;
        }
    }
    Ok(())
}

/// Witness URL: non-empty, bounded, UTF-8
pub(crate) fn validate_witness_url(field: &str, url: &[u8], config: &ProtocolConfig) -> Result<()> {
    ensure!(
        url.len() <= config.max_witness_url_length,
        ValidationError::range(field, "URL is too long")
    );
    ensure!(
        !url.is_empty(),
        ValidationError::range(field, "URL size must be greater than 0")
    );
    require_utf8(field, url)
}

fn check_signing_key(bytes: &[u8], _config: &ProtocolConfig) -> Result<()> {
    decode::<PublicKey>("key", bytes).map(|_| ())
}

fn check_account_creation_fee(bytes: &[u8], config: &ProtocolConfig) -> Result<()> {
    let fee: Asset = decode("account_creation_fee", bytes)?;
    fee.require_symbol("props.account_creation_fee", Symbol::Liquid)?;
    ensure!(
        fee.amount >= config.min_account_creation_fee,
        ValidationError::range(
            "props.account_creation_fee",
            "smaller than minimum account creation fee"
        )
    );
    Ok(())
}

fn check_maximum_block_size(bytes: &[u8], config: &ProtocolConfig) -> Result<()> {
    let size: u32 = decode("maximum_block_size", bytes)?;
    ensure!(
        size >= config.min_block_size_limit,
        ValidationError::range(
            "props.maximum_block_size",
            format!("smaller than minimum max block size {}", config.min_block_size_limit)
        )
    );
    Ok(())
}

fn check_pegged_interest_rate(bytes: &[u8], config: &ProtocolConfig) -> Result<()> {
    let rate: u16 = decode("pegged_interest_rate", bytes)?;
    ensure!(
        rate <= config.percent_100,
        ValidationError::range("props.pegged_interest_rate", "must not exceed 100%")
    );
    Ok(())
}

fn check_pegged_exchange_rate(bytes: &[u8], _config: &ProtocolConfig) -> Result<()> {
    let rate: Price = decode("pegged_exchange_rate", bytes)?;
    rate.base
        .require_symbol("props.pegged_exchange_rate.base", Symbol::Pegged)?;
    rate.quote
        .require_symbol("props.pegged_exchange_rate.quote", Symbol::Liquid)?;
    rate.validate()
}

fn check_url(bytes: &[u8], config: &ProtocolConfig) -> Result<()> {
    let url: Text = decode("url", bytes)?;
    validate_witness_url("props.url", url.as_bytes(), config)
}

fn check_account_subsidy_budget(bytes: &[u8], config: &ProtocolConfig) -> Result<()> {
    let budget: i32 = decode("account_subsidy_budget", bytes)?;
    ensure!(
        (config.rd_min_budget..=config.rd_max_budget).contains(&budget),
        ValidationError::range(
            "props.account_subsidy_budget",
            format!(
                "budget must be within [{}, {}]",
                config.rd_min_budget, config.rd_max_budget
            )
        )
    );
    Ok(())
}

fn check_account_subsidy_decay(bytes: &[u8], config: &ProtocolConfig) -> Result<()> {
    let decay: u32 = decode("account_subsidy_decay", bytes)?;
    ensure!(
        (config.rd_min_decay..=config.rd_max_decay).contains(&decay),
        ValidationError::range(
            "props.account_subsidy_decay",
            format!(
                "decay must be within [{}, {}]",
                config.rd_min_decay, config.rd_max_decay
            )
        )
    );
    Ok(())
}
