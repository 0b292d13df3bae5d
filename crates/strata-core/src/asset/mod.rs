//! Typed fixed-point amounts and exchange rates

mod amount;
mod price;
mod symbol;

pub use amount::{is_asset_type, Asset};
pub use price::Price;
pub use symbol::{damm_check_digit, Symbol, SymbolSpace, MAX_NAI_DATA, MAX_PRECISION};
