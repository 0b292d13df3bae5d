//! Fixed-point amounts tagged with a symbol
//!
//! Arithmetic between assets is only defined for like symbols; any mismatch
//! surfaces as a [`ValidationError::TypeMismatch`].

use super::price::Price;
use super::symbol::Symbol;
use crate::ensure;
use crate::errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Integer amount paired with its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    /// Amount in the symbol's smallest unit
    pub amount: i64,
    /// Token the amount is denominated in
    pub symbol: Symbol,
}

/// Whether `asset` is denominated in exactly `symbol`
pub fn is_asset_type(asset: &Asset, symbol: Symbol) -> bool {
    asset.symbol == symbol
}

impl Asset {
    /// Create an asset
    pub const fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// Zero of the given symbol
    pub const fn zero(symbol: Symbol) -> Self {
        Self { amount: 0, symbol }
    }

    /// Fail with a symbol mismatch unless denominated in `symbol`
    pub fn require_symbol(&self, field: &str, symbol: Symbol) -> Result<()> {
        ensure!(
            is_asset_type(self, symbol),
            ValidationError::type_mismatch(field, symbol, self.symbol)
        );
        Ok(())
    }

    fn require_same_symbol(&self, other: &Asset) -> Result<()> {
        ensure!(
            self.symbol == other.symbol,
            ValidationError::type_mismatch("asset", self.symbol, other.symbol)
        );
        Ok(())
    }

    /// Compare two like-symbol assets
    pub fn try_cmp(&self, other: &Asset) -> Result<Ordering> {
        self.require_same_symbol(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// Add two like-symbol assets
    pub fn checked_add(&self, other: &Asset) -> Result<Asset> {
        self.require_same_symbol(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| ValidationError::range("asset", "addition overflow"))?;
        Ok(Asset::new(amount, self.symbol))
    }

    /// Subtract two like-symbol assets
    pub fn checked_sub(&self, other: &Asset) -> Result<Asset> {
        self.require_same_symbol(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| ValidationError::range("asset", "subtraction overflow"))?;
        Ok(Asset::new(amount, self.symbol))
    }

    /// Negate
    pub fn checked_neg(&self) -> Result<Asset> {
        let amount = self
            .amount
            .checked_neg()
            .ok_or_else(|| ValidationError::range("asset", "negation overflow"))?;
        Ok(Asset::new(amount, self.symbol))
    }

    /// Convert through an exchange rate into the other side of the pair.
    ///
    /// Truncates toward zero, so small amounts may round to nothing.
    pub fn checked_mul_price(&self, price: &Price) -> Result<Asset> {
        let (numerator, denominator, symbol) = if self.symbol == price.base.symbol {
            (price.quote.amount, price.base.amount, price.quote.symbol)
        } else if self.symbol == price.quote.symbol {
            (price.base.amount, price.quote.amount, price.base.symbol)
        } else {
            return Err(ValidationError::type_mismatch(
                "asset",
                format!("{} or {}", price.base.symbol, price.quote.symbol),
                self.symbol,
            ));
        };
        ensure!(
            denominator != 0,
            ValidationError::range("price", "zero-valued side of exchange rate")
        );
        let scaled = i128::from(self.amount) * i128::from(numerator) / i128::from(denominator);
        let amount = i64::try_from(scaled)
            .map_err(|_| ValidationError::range("asset", "price conversion overflow"))?;
        Ok(Asset::new(amount, symbol))
    }
}

/// `base / quote` forms the exchange rate between the two.
impl std::ops::Div for Asset {
    type Output = Price;

    fn div(self, quote: Asset) -> Price {
        Price::new(self, quote)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = u32::from(self.symbol.precision());
        let magnitude = u128::from(self.amount.unsigned_abs());
        let sign = if self.amount < 0 { "-" } else { "" };
        // Unvalidated wire symbols may carry a precision no scale can hold.
        let scale = match 10u128.checked_pow(precision) {
            Some(scale) if precision > 0 => scale,
            _ => return write!(f, "{sign}{magnitude} {}", self.symbol),
        };
        write!(
            f,
            "{sign}{}.{:0width$} {}",
            magnitude / scale,
            magnitude % scale,
            self.symbol,
            width = precision as usize
        )
    }
}
