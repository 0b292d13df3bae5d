//! Signed block headers
//!
//! Only the parts needed to judge double-production evidence: the header
//! digest, the id with its embedded block number, and the signing key.

use serde::{Deserialize, Serialize};
use strata_core::{
    recover_public_key, AccountName, BlockId, Canonicality, CompactSignature, Digest, PublicKey,
    Result, SigningKey, TimePointSec,
};

/// Unsigned block header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Id of the parent block
    pub previous: BlockId,
    /// Production time
    pub timestamp: TimePointSec,
    /// Producing witness
    pub witness: AccountName,
    /// Merkle root over the block's transactions
    pub transaction_merkle_root: [u8; 20],
}

impl BlockHeader {
    /// SHA-256 of the encoded header; what the witness signs
    pub fn digest(&self) -> Result<Digest> {
        Digest::hash_encoded(self)
    }

    /// Height of this block
    pub fn block_num(&self) -> u32 {
        self.previous.block_num().wrapping_add(1)
    }
}

/// Block header plus the producing witness' signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlockHeader {
    /// Signed content
    pub header: BlockHeader,
    /// Canonical compact signature over [`BlockHeader::digest`]
    pub witness_signature: CompactSignature,
}

impl SignedBlockHeader {
    /// Sign `header` with the witness key
    pub fn sign(header: BlockHeader, key: &SigningKey) -> Result<Self> {
        let witness_signature = key.sign_compact(&header.digest()?, Canonicality::Canonical)?;
        Ok(Self {
            header,
            witness_signature,
        })
    }

    /// Key that produced the signature
    pub fn signee(&self) -> Result<PublicKey> {
        recover_public_key(&self.witness_signature, &self.header.digest()?)
    }

    /// Block id: hash of the signed header with the block number in front
    pub fn id(&self) -> Result<BlockId> {
        Ok(BlockId::from_digest(
            &Digest::hash_encoded(self)?,
            self.header.block_num(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_testkit::{test_block_id, test_signing_key};

    fn header(timestamp: TimePointSec) -> BlockHeader {
        BlockHeader {
            previous: test_block_id(41),
            timestamp,
            witness: "producer".to_string(),
            transaction_merkle_root: [7u8; 20],
        }
    }

    #[test]
    fn test_block_num_follows_previous() {
        let h = header(100);
        assert_eq!(h.block_num(), h.previous.block_num() + 1);
    }

    #[test]
    fn test_signee_is_signing_key() {
        let key = test_signing_key(4);
        let signed = SignedBlockHeader::sign(header(100), &key).unwrap();
        assert_eq!(signed.signee().unwrap(), key.public_key());
    }

    #[test]
    fn test_id_embeds_block_num_and_tracks_content() {
        let key = test_signing_key(4);
        let a = SignedBlockHeader::sign(header(100), &key).unwrap();
        let b = SignedBlockHeader::sign(header(103), &key).unwrap();
        assert_eq!(a.id().unwrap().block_num(), a.header.block_num());
        assert_ne!(a.id().unwrap(), b.id().unwrap());
    }
}
