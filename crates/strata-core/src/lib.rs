//! Strata Core - value types for stateless operation validation
//!
//! Everything an operation validator needs besides the operations themselves:
//!
//! - `ProtocolConfig`: immutable network constants threaded into every check
//! - `ValidationError`: the single typed failure every validator returns
//! - `Symbol`, `Asset`, `Price`: typed fixed-point amounts that refuse to mix symbols
//! - `Authority`: weighted threshold multi-signature structure
//! - Name, permlink and text grammar checks
//! - SHA-256 digests and secp256k1 compact signatures
//!
//! All types are plain values. Nothing here touches chain state.

#![forbid(unsafe_code)]

/// Typed fixed-point amounts and exchange rates
pub mod asset;

/// Weighted threshold authorities
pub mod authority;

/// Network constants
pub mod config;

/// Digests, block ids and compact signatures
pub mod crypto;

/// Unified error handling
pub mod errors;

/// Account name and permlink grammar
pub mod names;

/// Raw text fields and encoding checks
pub mod text;

pub use asset::{is_asset_type, Asset, Price, Symbol, SymbolSpace};
pub use authority::{Authority, Weight};
pub use config::ProtocolConfig;
pub use crypto::{
    parse_public_key, recover_public_key, BlockId, Canonicality, CompactSignature, Digest, PublicKey, SigningKey,
};
pub use errors::{ErrorCategory, Result, ValidationError};
pub use names::{
    is_valid_account_name, validate_account_name, validate_optional_account_name,
    validate_permlink, AccountName,
};
pub use text::{require_json, require_utf8, validate_json_metadata, Text};

/// Seconds since the Unix epoch, as carried on the wire
pub type TimePointSec = u32;
