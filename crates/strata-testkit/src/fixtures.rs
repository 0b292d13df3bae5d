//! Deterministic value fixtures
//!
//! Every key is derived from a seed so that failures reproduce exactly.

use strata_core::{
    AccountName, Asset, Authority, BlockId, Digest, ProtocolConfig, PublicKey, SigningKey,
    Symbol,
};

/// Default config with Equihash parameters small enough to solve in tests
pub fn test_config() -> ProtocolConfig {
    ProtocolConfig {
        equihash_n: 48,
        equihash_k: 5,
        ..ProtocolConfig::default()
    }
}

/// Signing key derived from `seed`
pub fn test_signing_key(seed: u64) -> SigningKey {
    let digest = Digest::hash(format!("strata-test-key-{seed}").as_bytes());
    SigningKey::from_digest(&digest).expect("hash of a seed is a valid secret key")
}

/// Public half of [`test_signing_key`]
pub fn test_public_key(seed: u64) -> PublicKey {
    test_signing_key(seed).public_key()
}

/// Block id derived from `seed` with an embedded block number
pub fn test_block_id(seed: u64) -> BlockId {
    let digest = Digest::hash(format!("strata-test-block-{seed}").as_bytes());
    BlockId::from_digest(&digest, (seed % 1_000_000) as u32 + 1)
}

/// Account name fixture
pub fn account(name: &str) -> AccountName {
    name.to_string()
}

/// Liquid token amount
pub fn liquid(amount: i64) -> Asset {
    Asset::new(amount, Symbol::Liquid)
}

/// Pegged token amount
pub fn pegged(amount: i64) -> Asset {
    Asset::new(amount, Symbol::Pegged)
}

/// Staked token amount
pub fn staked(amount: i64) -> Asset {
    Asset::new(amount, Symbol::Staked)
}

/// Authority satisfied by the single key derived from `seed`
pub fn key_authority(seed: u64) -> Authority {
    Authority::single_key(test_public_key(seed))
}

/// Two-of-three authority mixing keys and an account
pub fn multisig_authority(seed: u64) -> Authority {
    Authority::new(2)
        .with_key(test_public_key(seed), 1)
        .with_key(test_public_key(seed + 1), 1)
        .with_account("guardian", 1)
}

/// Authority whose threshold exceeds its combined member weight
pub fn impossible_authority(seed: u64) -> Authority {
    Authority::new(10).with_key(test_public_key(seed), 1)
}
