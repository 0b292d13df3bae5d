//! Create-then-validate behavior of the work schemes
//!
//! - pow2 records produced by `create` always validate
//! - changing the nonce, summary or worker of a pow2 record breaks it
//! - Equihash records survive the `Pow2Work` wrapper and reject tampering

use proptest::prelude::*;
use strata_core::{ErrorCategory, ValidationError};
use strata_pow::{EquihashPow, Pow2, Pow2Work, WorkProof};
use strata_testkit::strategies::arb_account_name;
use strata_testkit::{init_test_tracing, test_block_id, test_config};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pow2_create_always_validates(
        worker in arb_account_name(),
        block in 0u64..1_000,
        nonce in any::<u64>(),
    ) {
        let work = Pow2::create(test_block_id(block), &worker, nonce).unwrap();
        prop_assert!(work.validate(&test_config()).is_ok());
    }

    #[test]
    fn pow2_nonce_change_fails(
        worker in arb_account_name(),
        nonce in 0u64..u64::MAX,
    ) {
        let mut work = Pow2::create(test_block_id(1), &worker, nonce).unwrap();
        work.input.nonce = nonce + 1;
        prop_assert!(work.validate(&test_config()).is_err());
    }

    #[test]
    fn pow2_summary_change_fails(
        nonce in any::<u64>(),
        delta in 1u32..=u32::MAX,
    ) {
        let mut work = Pow2::create(test_block_id(2), "miner", nonce).unwrap();
        work.pow_summary = work.pow_summary.wrapping_add(delta);
        let err = work.validate(&test_config()).unwrap_err();
        prop_assert_eq!(err.category(), ErrorCategory::Crypto);
    }

    #[test]
    fn pow2_worker_change_fails(
        worker in arb_account_name(),
        nonce in any::<u64>(),
    ) {
        let mut work = Pow2::create(test_block_id(3), &worker, nonce).unwrap();
        work.input.worker_account = format!("{worker}x");
        prop_assert!(work.validate(&test_config()).is_err());
    }
}

#[test]
fn test_pow2_work_dispatches_to_variant() {
    init_test_tracing();
    let config = test_config();

    let pow2: Pow2Work = Pow2::create(test_block_id(4), "alice", 5).unwrap().into();
    assert_eq!(pow2.worker_account(), "alice");
    assert!(pow2.validate(&config).is_ok());

    let equihash: Pow2Work = EquihashPow::create(test_block_id(4), "bob", 5, &config)
        .unwrap()
        .into();
    assert_eq!(equihash.worker_account(), "bob");
    assert!(equihash.validate(&config).is_ok());
}

#[test]
fn test_equihash_tampered_inputs_fail() {
    init_test_tracing();
    let config = test_config();
    let work = EquihashPow::create(test_block_id(6), "carol", 0, &config).unwrap();

    let mut reordered = work.clone();
    reordered.proof.inputs.reverse();
    assert!(matches!(
        reordered.validate(&config),
        Err(ValidationError::Crypto { .. })
    ));

    let mut reseeded = work.clone();
    reseeded.proof.seed = strata_core::Digest::hash(b"elsewhere");
    assert!(reseeded.validate(&config).is_err());

    let mut renamed = work;
    renamed.input.worker_account = "dave".to_string();
    assert!(renamed.validate(&config).is_err());
}
