//! Hashing and secp256k1 primitives shared by proof-of-work and block headers

use crate::ensure;
use crate::errors::{Result, ValidationError};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SecretKey, SECP256K1};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;

/// Compressed secp256k1 public key
pub type PublicKey = secp256k1::PublicKey;

/// SHA-256 digest
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Hash raw bytes
    pub fn hash(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Hash several chunks as one contiguous message
    pub fn hash_chunks(chunks: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for chunk in chunks {
            hasher.update(chunk);
        }
        Self(hasher.finalize().into())
    }

    /// Hash the canonical binary encoding of `value`
    pub fn hash_encoded<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let bytes = bincode::serialize(value)
            .map_err(|e| ValidationError::encoding("digest input", e.to_string()))?;
        Ok(Self::hash(&bytes))
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// All-zero digest
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Count of leading zero bits; 256 for the zero digest
    pub fn leading_zeros(&self) -> u32 {
        let mut total = 0;
        for byte in self.0 {
            if byte != 0 {
                return total + byte.leading_zeros();
            }
            total += 8;
        }
        total
    }

    /// Approximate log2 of the digest read as a 256-bit big-endian integer.
    ///
    /// The top byte holds the index of the highest set bit, the low 24 bits
    /// the bits that follow it. Zero maps to zero. Larger values mean less
    /// work, so comparisons of summaries order proofs by difficulty.
    pub fn approx_log_32(&self) -> u32 {
        let lz = self.leading_zeros();
        if lz >= 256 {
            return 0;
        }
        let nz_bits = 255 - lz;
        let offset = (lz / 8) as usize;
        let byte_at = |i: usize| u32::from(self.0.get(i).copied().unwrap_or(0));
        let mut window = (byte_at(offset) << 24)
            | (byte_at(offset + 1) << 16)
            | (byte_at(offset + 2) << 8)
            | byte_at(offset + 3);
        // Align the leading one to bit 31, then keep it plus 24 bits behind it.
        window <<= lz & 7;
        window >>= 7;
        window ^= 1 << 24;
        window | (nz_bits << 24)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(self.0))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// 160-bit block identifier; the first four bytes encode the block number
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub [u8; 20]);

impl BlockId {
    /// Build an id from a full digest and the block number it identifies
    pub fn from_digest(digest: &Digest, block_num: u32) -> Self {
        let mut id = [0u8; 20];
        id.copy_from_slice(&digest.0[..20]);
        id[..4].copy_from_slice(&block_num.to_be_bytes());
        Self(id)
    }

    /// Block number embedded in the id
    pub fn block_num(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", hex::encode(self.0))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Signing discipline used when producing a compact signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canonicality {
    /// First deterministic signature, whatever its shape
    NonCanonical,
    /// Retry with extra nonce data until `r` and `s` are both canonical
    Canonical,
}

/// Upper bound on re-signing attempts while searching for a canonical signature
const MAX_CANONICAL_ATTEMPTS: u32 = 1024;

/// 65-byte recoverable signature: recovery id plus `r` and `s`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompactSignature {
    /// Recovery id in `0..4`
    pub recovery_id: u8,
    /// Big-endian `r`
    pub r: [u8; 32],
    /// Big-endian `s`
    pub s: [u8; 32],
}

impl CompactSignature {
    fn from_recoverable(sig: &RecoverableSignature) -> Self {
        let (recid, data) = sig.serialize_compact();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&data[..32]);
        s.copy_from_slice(&data[32..]);
        Self {
            // recid is always in 0..4
            recovery_id: recid.to_i32() as u8,
            r,
            s,
        }
    }

    fn to_recoverable(self) -> Result<RecoverableSignature> {
        let recid = RecoveryId::from_i32(i32::from(self.recovery_id))?;
        let mut data = [0u8; 64];
        data[..32].copy_from_slice(&self.r);
        data[32..].copy_from_slice(&self.s);
        Ok(RecoverableSignature::from_compact(&data, recid)?)
    }

    /// Wire form: header byte (27 + 4 + recovery id) followed by `r` and `s`
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = (27 + 4u8).wrapping_add(self.recovery_id);
        out[1..33].copy_from_slice(&self.r);
        out[33..].copy_from_slice(&self.s);
        out
    }

    /// Neither `r` nor `s` has its top bit set or a redundant leading zero byte
    pub fn is_canonical(&self) -> bool {
        let canonical_half = |half: &[u8; 32]| {
            half[0] & 0x80 == 0 && !(half[0] == 0 && half[1] & 0x80 == 0)
        };
        canonical_half(&self.r) && canonical_half(&self.s)
    }

    /// SHA-256 of the wire form
    pub fn digest(&self) -> Digest {
        Digest::hash(&self.to_bytes())
    }
}

impl fmt::Debug for CompactSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactSignature({})", hex::encode(self.to_bytes()))
    }
}

/// secp256k1 private key
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SigningKey(SecretKey);

impl SigningKey {
    /// Regenerate a key deterministically from a digest
    pub fn from_digest(seed: &Digest) -> Result<Self> {
        Ok(Self(SecretKey::from_slice(&seed.0)?))
    }

    /// Matching public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(SECP256K1, &self.0)
    }

    /// Produce a compact recoverable signature over `digest`
    pub fn sign_compact(&self, digest: &Digest, mode: Canonicality) -> Result<CompactSignature> {
        let message = Message::from_digest(digest.0);
        match mode {
            Canonicality::NonCanonical => Ok(CompactSignature::from_recoverable(
                &SECP256K1.sign_ecdsa_recoverable(&message, &self.0),
            )),
            Canonicality::Canonical => {
                for attempt in 0..MAX_CANONICAL_ATTEMPTS {
                    let sig = if attempt == 0 {
                        SECP256K1.sign_ecdsa_recoverable(&message, &self.0)
                    } else {
                        let mut extra = [0u8; 32];
                        extra[..4].copy_from_slice(&attempt.to_le_bytes());
                        SECP256K1.sign_ecdsa_recoverable_with_noncedata(&message, &self.0, &extra)
                    };
                    let compact = CompactSignature::from_recoverable(&sig);
                    if compact.is_canonical() {
                        return Ok(compact);
                    }
                }
                Err(ValidationError::crypto("no canonical signature found"))
            }
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey({})", self.public_key())
    }
}

/// Recover the public key that produced `signature` over `digest`
pub fn recover_public_key(signature: &CompactSignature, digest: &Digest) -> Result<PublicKey> {
    let message = Message::from_digest(digest.0);
    let sig = signature.to_recoverable()?;
    Ok(SECP256K1.recover_ecdsa(&message, &sig)?)
}

/// Parse a compressed public key
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey> {
    ensure!(
        bytes.len() == 33,
        ValidationError::encoding("public key", format!("expected 33 bytes, got {}", bytes.len()))
    );
    Ok(PublicKey::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(seed: u8) -> SigningKey {
        SigningKey::from_digest(&Digest::hash(&[seed])).unwrap()
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            Digest::hash(b"abc").to_string(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(Digest::hash_chunks(&[b"a", b"bc"]), Digest::hash(b"abc"));
    }

    #[test]
    fn test_approx_log_32() {
        assert_eq!(Digest::default().approx_log_32(), 0);

        let mut one = [0u8; 32];
        one[31] = 1;
        assert_eq!(Digest(one).approx_log_32(), 0);

        let mut top = [0u8; 32];
        top[0] = 0x80;
        assert_eq!(Digest(top).approx_log_32(), 255 << 24);

        let mut ones = [0u8; 32];
        ones[0] = 0xff;
        ones[1] = 0xff;
        ones[2] = 0xff;
        ones[3] = 0xff;
        assert_eq!(Digest(ones).approx_log_32(), (255 << 24) | 0x00ff_ffff);

        let mut mid = [0u8; 32];
        mid[1] = 0x01;
        mid[2] = 0x80;
        assert_eq!(Digest(mid).approx_log_32(), (240 << 24) | 0x0080_0000);
    }

    #[test]
    fn test_summary_orders_by_magnitude() {
        let mut small = [0u8; 32];
        small[4] = 0x10;
        let mut large = [0u8; 32];
        large[2] = 0x01;
        assert!(Digest(small).approx_log_32() < Digest(large).approx_log_32());
    }

    #[test]
    fn test_block_id_embeds_number() {
        let id = BlockId::from_digest(&Digest::hash(b"block"), 4242);
        assert_eq!(id.block_num(), 4242);
    }

    #[test]
    fn test_sign_and_recover() {
        let signer = key(7);
        let digest = Digest::hash(b"payload");
        for mode in [Canonicality::NonCanonical, Canonicality::Canonical] {
            let sig = signer.sign_compact(&digest, mode).unwrap();
            assert_eq!(recover_public_key(&sig, &digest).unwrap(), signer.public_key());
        }
    }

    #[test]
    fn test_canonical_signatures_are_canonical() {
        for seed in 0..16 {
            let sig = key(seed)
                .sign_compact(&Digest::hash(&[seed, 1]), Canonicality::Canonical)
                .unwrap();
            assert!(sig.is_canonical());
        }
    }

    #[test]
    fn test_recovery_over_other_digest_yields_other_key() {
        let signer = key(9);
        let sig = signer
            .sign_compact(&Digest::hash(b"one"), Canonicality::NonCanonical)
            .unwrap();
        let other = recover_public_key(&sig, &Digest::hash(b"two")).unwrap();
        assert_ne!(other, signer.public_key());
    }

    #[test]
    fn test_parse_public_key() {
        let public = key(3).public_key();
        assert_eq!(parse_public_key(&public.serialize()).unwrap(), public);
        assert!(parse_public_key(&[2u8; 10]).is_err());
        assert!(parse_public_key(&[9u8; 33]).is_err());
    }
}
