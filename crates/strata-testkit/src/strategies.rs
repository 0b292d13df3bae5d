//! Proptest strategies for core types
//!
//! Generators stay inside the grammar by construction; tests that need
//! malformed input build it explicitly.

use proptest::prelude::*;
use strata_core::{AccountName, Asset, Symbol};

// Re-export proptest for convenience
pub use proptest;

/// Strategy for well-formed single-label account names
pub fn arb_account_name() -> impl Strategy<Value = AccountName> {
    "[a-z][a-z0-9-]{1,12}[a-z0-9]"
}

/// Strategy for well-formed permlinks
pub fn arb_permlink() -> impl Strategy<Value = String> {
    "[a-z0-9-]{0,64}"
}

/// Strategy for any of the core symbols
pub fn arb_core_symbol() -> impl Strategy<Value = Symbol> {
    prop_oneof![Just(Symbol::Liquid), Just(Symbol::Pegged), Just(Symbol::Staked)]
}

/// Strategy for non-negative liquid amounts
pub fn arb_liquid(max: i64) -> impl Strategy<Value = Asset> {
    (0..=max).prop_map(|amount| Asset::new(amount, Symbol::Liquid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{is_valid_account_name, validate_permlink, ProtocolConfig};

    proptest! {
        #[test]
        fn generated_names_are_valid(name in arb_account_name()) {
            prop_assert!(is_valid_account_name(&name, &ProtocolConfig::default()));
        }

        #[test]
        fn generated_permlinks_are_valid(permlink in arb_permlink()) {
            prop_assert!(validate_permlink("permlink", &permlink, &ProtocolConfig::default()).is_ok());
        }
    }
}
