//! Field checks shared across operation validators

use strata_core::{ensure, require_utf8, Asset, ProtocolConfig, Result, Symbol, Text, ValidationError};

/// Amount strictly above zero
pub(crate) fn require_positive(field: &str, asset: &Asset) -> Result<()> {
    ensure!(
        asset.amount > 0,
        ValidationError::range(field, "must be positive")
    );
    Ok(())
}

/// Amount zero or above
pub(crate) fn require_non_negative(field: &str, asset: &Asset) -> Result<()> {
    ensure!(
        asset.amount >= 0,
        ValidationError::range(field, "cannot be negative")
    );
    Ok(())
}

/// Symbol is one of `allowed`
pub(crate) fn require_symbol_in(field: &str, asset: &Asset, allowed: &[Symbol]) -> Result<()> {
    if allowed.contains(&asset.symbol) {
        return Ok(());
    }
    let expected = allowed
        .iter()
        .map(Symbol::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    Err(ValidationError::type_mismatch(field, expected, asset.symbol))
}

/// Memo shorter than the network limit and valid UTF-8
pub(crate) fn validate_memo(memo: &Text, config: &ProtocolConfig) -> Result<()> {
    ensure!(
        memo.len() < config.max_memo_size,
        ValidationError::range("memo", "memo is too large")
    );
    require_utf8("memo", memo.as_bytes())
}

/// Percentage in hundredths, at most 100%
pub(crate) fn require_percent(field: &str, percent: u16, config: &ProtocolConfig) -> Result<()> {
    ensure!(
        percent <= config.percent_100,
        ValidationError::range(field, "percent cannot exceed 100%")
    );
    Ok(())
}
