//! Exchange rate between two distinct symbols

use super::amount::Asset;
use crate::ensure;
use crate::errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `base` is worth `quote`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Side being priced
    pub base: Asset,
    /// Side it is priced in
    pub quote: Asset,
}

impl Price {
    /// Pair two assets into an exchange rate
    pub const fn new(base: Asset, quote: Asset) -> Self {
        Self { base, quote }
    }

    /// Both sides strictly positive and of differing symbols
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.base.amount > 0,
            ValidationError::range("price.base", "amount must be positive")
        );
        ensure!(
            self.quote.amount > 0,
            ValidationError::range("price.quote", "amount must be positive")
        );
        ensure!(
            self.base.symbol != self.quote.symbol,
            ValidationError::structural(format!(
                "price base and quote share symbol {}",
                self.base.symbol
            ))
        );
        Ok(())
    }

    /// Swap base and quote
    pub fn inverted(&self) -> Price {
        Price::new(self.quote, self.base)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
