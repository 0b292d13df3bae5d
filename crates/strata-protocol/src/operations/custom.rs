//! Application-defined payloads
//!
//! The chain does not interpret these; it only checks that someone is
//! accountable for them and that the envelope is well-formed.

use super::Validate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strata_core::{
    ensure, require_json, require_utf8, AccountName, Authority, ProtocolConfig, Result, Text,
    ValidationError,
};

fn require_signer(count: usize) -> Result<()> {
    ensure!(
        count > 0,
        ValidationError::structural("at least one account must be specified")
    );
    Ok(())
}

fn require_custom_id(id: &str, config: &ProtocolConfig) -> Result<()> {
    ensure!(
        id.len() <= config.max_custom_id_length,
        ValidationError::range("id", "id is too long")
    );
    Ok(())
}

/// Opaque binary payload with a numeric tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOperation {
    /// Accounts whose active authority signs
    pub required_auths: BTreeSet<AccountName>,
    /// Application tag
    pub id: u16,
    /// Payload
    pub data: Vec<u8>,
}

impl Validate for CustomOperation {
    fn validate(&self, _config: &ProtocolConfig) -> Result<()> {
        require_signer(self.required_auths.len())
    }
}

/// JSON payload with a string tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomJsonOperation {
    /// Accounts whose active authority signs
    pub required_auths: BTreeSet<AccountName>,
    /// Accounts whose posting authority signs
    pub required_posting_auths: BTreeSet<AccountName>,
    /// Application tag
    pub id: String,
    /// JSON document
    pub json: Text,
}

impl Validate for CustomJsonOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        require_signer(self.required_auths.len() + self.required_posting_auths.len())?;
        require_custom_id(&self.id, config)?;
        require_utf8("json", self.json.as_bytes())?;
        require_json("json", self.json.as_bytes())
    }
}

/// Binary payload that may name arbitrary authorities as signers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBinaryOperation {
    /// Accounts whose owner authority signs
    pub required_owner_auths: BTreeSet<AccountName>,
    /// Accounts whose active authority signs
    pub required_active_auths: BTreeSet<AccountName>,
    /// Accounts whose posting authority signs
    pub required_posting_auths: BTreeSet<AccountName>,
    /// Ad hoc authorities that must also be satisfied
    pub required_auths: Vec<Authority>,
    /// Application tag
    pub id: String,
    /// Payload
    pub data: Vec<u8>,
}

impl Validate for CustomBinaryOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        require_signer(
            self.required_owner_auths.len()
                + self.required_active_auths.len()
                + self.required_posting_auths.len(),
        )?;
        require_custom_id(&self.id, config)?;
        for authority in &self.required_auths {
            authority.validate(config)?;
        }
        Ok(())
    }
}
