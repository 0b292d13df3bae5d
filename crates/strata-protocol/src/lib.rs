//! Strata Protocol - operations and their stateless validators
//!
//! Every operation a transaction can carry is a variant of [`Operation`].
//! [`validate_operation`] answers whether one operation value is internally
//! well-formed, using only its own fields and the [`ProtocolConfig`]. It never
//! consults chain state, so calling it twice on the same value always yields
//! the same answer.
//!
//! Supporting structures live beside the operations:
//!
//! - [`ChainProperties`]: witness-proposed network parameters
//! - [`WitnessProperties`]: key-addressed, individually encoded properties
//! - [`CommentOptionsExtension`]: optional side data on comment options
//! - [`SignedBlockHeader`]: evidence carried by over-production reports
//!
//! [`ProtocolConfig`]: strata_core::ProtocolConfig

#![forbid(unsafe_code)]

/// Signed block headers
pub mod block_header;

/// Witness-proposed chain parameters
pub mod chain_properties;

/// Optional operation side data
pub mod extensions;

/// Operation definitions and dispatch
pub mod operations;

/// Key-addressed witness properties
pub mod witness_props;

pub use block_header::{BlockHeader, SignedBlockHeader};
pub use chain_properties::ChainProperties;
#[cfg(feature = "smt")]
pub use extensions::{AllowedVoteAssets, VotableAssetInfo};
pub use extensions::{
    BeneficiaryRoute, CommentOptionsExtension, CommentPayoutBeneficiaries, FutureExtension,
};
pub use operations::*;
pub use witness_props::{encode_property, validate_witness_properties, WitnessProperties};
