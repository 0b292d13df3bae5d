//! Strata Testkit - shared fixtures for validation tests
//!
//! Deterministic keys, assets, authorities and a small-parameter protocol
//! config so that Equihash proofs can be solved inside a unit test.

#![allow(clippy::unwrap_used, clippy::expect_used)]

/// Deterministic value fixtures
pub mod fixtures;

/// Proptest strategies for core types
pub mod strategies;

/// Test tracing setup
pub mod tracing_setup;

pub use fixtures::*;
pub use tracing_setup::init_test_tracing;
