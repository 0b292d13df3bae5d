//! Price feeds and the internal order book

use super::Validate;
use serde::{Deserialize, Serialize};
use strata_core::{
    ensure, validate_account_name, AccountName, Asset, Price, ProtocolConfig, Result, Symbol,
    SymbolSpace, TimePointSec, ValidationError,
};

const MARKET_DESCRIPTION: &str = "a STR:SUSD or NAI:STR market";

/// Pairs the order book trades: liquid against pegged in either direction,
/// or a user-issued token against the liquid token in either direction
fn is_tradable_pair(sell: Symbol, receive: Symbol) -> bool {
    matches!(
        (sell, receive),
        (Symbol::Liquid, Symbol::Pegged) | (Symbol::Pegged, Symbol::Liquid)
    ) || (sell.space() == SymbolSpace::Nai && receive == Symbol::Liquid)
        || (sell == Symbol::Liquid && receive.space() == SymbolSpace::Nai)
}

fn require_tradable_pair(sell: Symbol, receive: Symbol) -> Result<()> {
    ensure!(
        is_tradable_pair(sell, receive),
        ValidationError::type_mismatch(
            "amount_to_sell",
            MARKET_DESCRIPTION,
            format!("{sell}:{receive}")
        )
    );
    Ok(())
}

/// Witness report of the liquid/pegged exchange rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPublishOperation {
    /// Reporting witness
    pub publisher: AccountName,
    /// Reported rate
    pub exchange_rate: Price,
}

impl Validate for FeedPublishOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("publisher", &self.publisher, config)?;
        let pair = (self.exchange_rate.base.symbol, self.exchange_rate.quote.symbol);
        ensure!(
            matches!(
                pair,
                (Symbol::Liquid, Symbol::Pegged) | (Symbol::Pegged, Symbol::Liquid)
            ),
            ValidationError::type_mismatch(
                "exchange_rate",
                "a STR/SUSD price",
                format!("{}/{}", pair.0, pair.1)
            )
        );
        self.exchange_rate.validate()
    }
}

/// Place an order priced by a minimum receive amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderCreateOperation {
    /// Order owner
    pub owner: AccountName,
    /// Owner-chosen order identifier
    pub order_id: u32,
    /// Amount offered
    pub amount_to_sell: Asset,
    /// Least acceptable proceeds
    pub min_to_receive: Asset,
    /// Cancel unless filled immediately
    pub fill_or_kill: bool,
    /// Expiry time
    pub expiration: TimePointSec,
}

impl Validate for LimitOrderCreateOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("owner", &self.owner, config)?;
        require_tradable_pair(self.amount_to_sell.symbol, self.min_to_receive.symbol)?;
        (self.amount_to_sell / self.min_to_receive).validate()
    }
}

/// Place an order priced by an explicit exchange rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderCreate2Operation {
    /// Order owner
    pub owner: AccountName,
    /// Owner-chosen order identifier
    pub order_id: u32,
    /// Amount offered
    pub amount_to_sell: Asset,
    /// Rate with the sold token as base
    pub exchange_rate: Price,
    /// Cancel unless filled immediately
    pub fill_or_kill: bool,
    /// Expiry time
    pub expiration: TimePointSec,
}

impl Validate for LimitOrderCreate2Operation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("owner", &self.owner, config)?;
        ensure!(
            self.amount_to_sell.symbol == self.exchange_rate.base.symbol,
            ValidationError::type_mismatch(
                "amount_to_sell",
                self.exchange_rate.base.symbol,
                self.amount_to_sell.symbol
            )
        );
        self.exchange_rate.validate()?;
        require_tradable_pair(self.amount_to_sell.symbol, self.exchange_rate.quote.symbol)?;
        let proceeds = self.amount_to_sell.checked_mul_price(&self.exchange_rate)?;
        ensure!(
            proceeds.amount > 0,
            ValidationError::range(
                "amount_to_sell",
                "amount to sell cannot round to 0 when traded"
            )
        );
        Ok(())
    }
}

/// Cancel an open order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderCancelOperation {
    /// Order owner
    pub owner: AccountName,
    /// Order being cancelled
    pub order_id: u32,
}

impl Validate for LimitOrderCancelOperation {
    fn validate(&self, config: &ProtocolConfig) -> Result<()> {
        validate_account_name("owner", &self.owner, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use strata_testkit::{liquid, pegged, staked, test_config};

    fn smt(amount: i64) -> Asset {
        Asset::new(amount, Symbol::smt(21, 3))
    }

    #[test]
    fn test_tradable_pairs() {
        assert!(is_tradable_pair(Symbol::Liquid, Symbol::Pegged));
        assert!(is_tradable_pair(Symbol::Pegged, Symbol::Liquid));
        assert!(is_tradable_pair(Symbol::smt(21, 3), Symbol::Liquid));
        assert!(is_tradable_pair(Symbol::Liquid, Symbol::smt(21, 3)));
        assert!(!is_tradable_pair(Symbol::Pegged, Symbol::smt(21, 3)));
        assert!(!is_tradable_pair(Symbol::Staked, Symbol::Liquid));
        assert!(!is_tradable_pair(Symbol::Liquid, Symbol::Liquid));
    }

    #[test]
    fn test_feed_publish_either_direction() {
        let config = test_config();
        let feed = FeedPublishOperation {
            publisher: "witness".into(),
            exchange_rate: Price::new(pegged(1_000), liquid(3_500)),
        };
        assert!(feed.validate(&config).is_ok());
        let flipped = FeedPublishOperation {
            exchange_rate: feed.exchange_rate.inverted(),
            ..feed.clone()
        };
        assert!(flipped.validate(&config).is_ok());
        let staked_feed = FeedPublishOperation {
            exchange_rate: Price::new(staked(1), liquid(1)),
            ..feed.clone()
        };
        assert_matches!(staked_feed.validate(&config), Err(ValidationError::TypeMismatch { .. }));
        let zero = FeedPublishOperation {
            exchange_rate: Price::new(pegged(0), liquid(1)),
            ..feed
        };
        assert_matches!(zero.validate(&config), Err(ValidationError::Range { .. }));
    }

    #[test]
    fn test_limit_order_create() {
        let config = test_config();
        let order = LimitOrderCreateOperation {
            owner: "trader".into(),
            order_id: 1,
            amount_to_sell: liquid(1_000),
            min_to_receive: pegged(250),
            fill_or_kill: false,
            expiration: 1_700_000_000,
        };
        assert!(order.validate(&config).is_ok());

        let smt_order = LimitOrderCreateOperation { amount_to_sell: smt(5), min_to_receive: liquid(5), ..order.clone() };
        assert!(smt_order.validate(&config).is_ok());

        let wrong_market = LimitOrderCreateOperation { min_to_receive: smt(5), amount_to_sell: pegged(5), ..order.clone() };
        assert_matches!(wrong_market.validate(&config), Err(ValidationError::TypeMismatch { .. }));

        let free = LimitOrderCreateOperation { min_to_receive: pegged(0), ..order };
        assert_matches!(free.validate(&config), Err(ValidationError::Range { .. }));
    }

    #[test]
    fn test_limit_order_create2() {
        let config = test_config();
        let order = LimitOrderCreate2Operation {
            owner: "trader".into(),
            order_id: 2,
            amount_to_sell: liquid(1_000),
            exchange_rate: Price::new(liquid(4), pegged(1)),
            fill_or_kill: true,
            expiration: 1_700_000_000,
        };
        assert!(order.validate(&config).is_ok());

        let mismatched_base = LimitOrderCreate2Operation { amount_to_sell: pegged(1_000), ..order.clone() };
        assert_matches!(mismatched_base.validate(&config), Err(ValidationError::TypeMismatch { .. }));

        let dust = LimitOrderCreate2Operation { amount_to_sell: liquid(3), ..order.clone() };
        assert_matches!(dust.validate(&config), Err(ValidationError::Range { .. }));

        let whole_supply = LimitOrderCreate2Operation {
            amount_to_sell: liquid(i64::MAX),
            exchange_rate: Price::new(liquid(3), pegged(2)),
            ..order.clone()
        };
        assert!(whole_supply.validate(&config).is_ok());

        let overflowing = LimitOrderCreate2Operation {
            amount_to_sell: liquid(i64::MAX),
            exchange_rate: Price::new(liquid(1), pegged(2)),
            ..order.clone()
        };
        assert_matches!(
            overflowing.validate(&config),
            Err(ValidationError::Range { field, .. }) if field == "asset"
        );

        let cancel = LimitOrderCancelOperation {
            owner: order.owner,
            order_id: order.order_id,
        };
        assert!(cancel.validate(&config).is_ok());
    }
}
