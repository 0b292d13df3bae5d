//! Token symbols: the three core tokens plus the open NAI space

use crate::ensure;
use crate::errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest NAI data value (eight decimal digits)
pub const MAX_NAI_DATA: u32 = 99_999_999;

/// Highest supported decimal precision
pub const MAX_PRECISION: u8 = 12;

/// Namespace a symbol belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolSpace {
    /// One of the three built-in tokens
    Core,
    /// User-issued token
    Nai,
}

/// Token symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Primary spendable token
    Liquid,
    /// Token whose target value tracks an external reference
    Pegged,
    /// Locked stake ("power"); never transferable
    Staked,
    /// User-issued token identified by its NAI
    Nai {
        /// Full NAI including the trailing check digit
        nai: u32,
        /// Decimal places
        precision: u8,
        /// Staked form of the token
        staked: bool,
    },
}

impl Symbol {
    /// Liquid NAI-space symbol
    pub const fn smt(nai: u32, precision: u8) -> Self {
        Symbol::Nai {
            nai,
            precision,
            staked: false,
        }
    }

    /// Staked NAI-space symbol
    pub const fn smt_staked(nai: u32, precision: u8) -> Self {
        Symbol::Nai {
            nai,
            precision,
            staked: true,
        }
    }

    /// Build a NAI-space symbol from its eight data digits, appending the check digit
    pub fn from_nai_data(data: u32, precision: u8) -> Result<Self> {
        ensure!(
            (1..=MAX_NAI_DATA).contains(&data),
            ValidationError::range("symbol", format!("NAI data {data} outside [1, {MAX_NAI_DATA}]"))
        );
        let symbol = Self::smt(data * 10 + damm_check_digit(data), precision);
        symbol.validate()?;
        Ok(symbol)
    }

    /// Namespace of the symbol
    pub fn space(&self) -> SymbolSpace {
        match self {
            Symbol::Nai { .. } => SymbolSpace::Nai,
            _ => SymbolSpace::Core,
        }
    }

    /// Whether the symbol denotes staked tokens
    pub fn is_staked(&self) -> bool {
        match self {
            Symbol::Staked => true,
            Symbol::Nai { staked, .. } => *staked,
            _ => false,
        }
    }

    /// Decimal places
    pub fn precision(&self) -> u8 {
        match self {
            Symbol::Liquid | Symbol::Pegged => 3,
            Symbol::Staked => 6,
            Symbol::Nai { precision, .. } => *precision,
        }
    }

    /// Canonical numeric identifier; shared by the liquid and staked forms of a token.
    pub fn to_nai(&self) -> u32 {
        match self {
            Symbol::Liquid => 21,
            Symbol::Pegged => 13,
            Symbol::Staked => 37,
            Symbol::Nai { nai, .. } => *nai,
        }
    }

    /// Check NAI range, check digit and precision of a NAI-space symbol
    pub fn validate(&self) -> Result<()> {
        let Symbol::Nai { nai, precision, .. } = *self else {
            return Ok(());
        };
        let data = nai / 10;
        ensure!(
            (1..=MAX_NAI_DATA).contains(&data),
            ValidationError::range("symbol", format!("NAI {nai} outside the NAI space"))
        );
        ensure!(
            nai % 10 == damm_check_digit(data),
            ValidationError::range("symbol", format!("NAI {nai} has an invalid check digit"))
        );
        ensure!(
            precision <= MAX_PRECISION,
            ValidationError::range(
                "symbol",
                format!("precision {precision} exceeds {MAX_PRECISION}")
            )
        );
        Ok(())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Liquid => f.write_str("STR"),
            Symbol::Pegged => f.write_str("SUSD"),
            Symbol::Staked => f.write_str("SPWR"),
            Symbol::Nai { nai, staked, .. } => {
                write!(f, "@@{nai:09}")?;
                if *staked {
                    f.write_str(".staked")?;
                }
                Ok(())
            }
        }
    }
}

const DAMM_TABLE: [[u8; 10]; 10] = [
    [0, 3, 1, 7, 5, 9, 8, 6, 4, 2],
    [7, 0, 9, 2, 1, 5, 4, 8, 6, 3],
    [4, 2, 0, 6, 8, 7, 1, 3, 5, 9],
    [1, 7, 5, 0, 9, 8, 3, 4, 2, 6],
    [6, 1, 2, 3, 0, 4, 5, 9, 7, 8],
    [3, 6, 7, 4, 2, 0, 9, 5, 8, 1],
    [5, 8, 6, 9, 7, 2, 0, 1, 3, 4],
    [8, 9, 4, 5, 3, 6, 2, 0, 1, 7],
    [9, 4, 3, 8, 6, 1, 7, 2, 0, 5],
    [2, 5, 8, 1, 4, 3, 6, 7, 9, 0],
];

/// Damm check digit over the eight decimal digits of `data` (zero padded)
pub fn damm_check_digit(data: u32) -> u32 {
    let mut interim = 0usize;
    let mut divisor = 10_000_000;
    while divisor > 0 {
        let digit = ((data / divisor) % 10) as usize;
        interim = DAMM_TABLE[interim][digit] as usize;
        divisor /= 10;
    }
    interim as u32
}
