//! Account name and permlink grammar

use crate::config::ProtocolConfig;
use crate::errors::{Result, ValidationError};

/// Ledger account identifier. Validity is a grammar check, not a type guarantee.
pub type AccountName = String;

/// Shortest permitted dot-separated label inside an account name
const MIN_LABEL_LENGTH: usize = 3;

/// Describe why `name` is not a valid account name, if it is not.
fn account_name_violation(name: &str, config: &ProtocolConfig) -> Option<&'static str> {
    let len = name.len();
    if len < config.min_account_name_length {
        return Some("name is too short");
    }
    if len > config.max_account_name_length {
        return Some("name is too long");
    }

    for label in name.split('.') {
        let bytes = label.as_bytes();
        if bytes.len() < MIN_LABEL_LENGTH {
            return Some("each dot-separated segment needs at least 3 characters");
        }
        if !bytes[0].is_ascii_lowercase() {
            return Some("segments must start with a lowercase letter");
        }
        let last = bytes[bytes.len() - 1];
        if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
            return Some("segments must end with a lowercase letter or digit");
        }
        let interior_ok = bytes[1..bytes.len() - 1]
            .iter()
            .all(|&c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'-');
        if !interior_ok {
            return Some("segments may only contain lowercase letters, digits and '-'");
        }
    }

    None
}

/// Whether `name` satisfies the account naming convention
pub fn is_valid_account_name(name: &str, config: &ProtocolConfig) -> bool {
    account_name_violation(name, config).is_none()
}

/// Validate an account name held in `field`
pub fn validate_account_name(field: &str, name: &str, config: &ProtocolConfig) -> Result<()> {
    match account_name_violation(name, config) {
        None => Ok(()),
        Some(reason) => Err(ValidationError::grammar(field, name, reason)),
    }
}

/// Validate an optional account reference where the empty name means "none"
pub fn validate_optional_account_name(
    field: &str,
    name: &str,
    config: &ProtocolConfig,
) -> Result<()> {
    if name.is_empty() {
        return Ok(());
    }
    validate_account_name(field, name, config)
}

/// Validate a content permlink held in `field`
pub fn validate_permlink(field: &str, permlink: &str, config: &ProtocolConfig) -> Result<()> {
    if permlink.len() >= config.max_permlink_length {
        return Err(ValidationError::grammar(field, permlink, "permlink is too long"));
    }
    let well_formed = permlink
        .bytes()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'-');
    if !well_formed {
        return Err(ValidationError::grammar(
            field,
            permlink,
            "permlink may only contain lowercase letters, digits and '-'",
        ));
    }
    Ok(())
}
