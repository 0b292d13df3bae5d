//! Equihash generalized-birthday proofs
//!
//! Index hashes are `n`-bit strings produced by BLAKE3 in key-derivation
//! mode over `(n, k, seed, nonce, index)`. A solution is `2^k` distinct
//! indices arranged as a binary tree: every subtree of `2^l` leaves XORs to
//! a value with `l * n / (k + 1)` leading zero bits, the whole tree XORs to
//! zero, and each left subtree starts with a smaller index than its right
//! sibling.
//!
//! The solver is Wagner's algorithm: sort on the next collision window,
//! pair up colliding rows with disjoint index sets, repeat `k` times.

use serde::{Deserialize, Serialize};
use strata_core::{ensure, Digest, ProtocolConfig, Result, ValidationError};
use tracing::{debug, trace};

const HASH_CONTEXT: &str = "strata equihash v1 index hash";

/// Solver nonces tried before giving up on a seed
pub const MAX_SOLVER_ATTEMPTS: u32 = 256;

/// Rows kept per round, as a multiple of the initial list length
const ROW_LIMIT_FACTOR: usize = 4;

/// Equihash `(n, k)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquihashParams {
    /// Hash width in bits
    pub n: u32,
    /// Number of collision rounds
    pub k: u32,
}

impl EquihashParams {
    /// Check that `(n, k)` describes a solvable instance with 32-bit indices
    pub fn new(n: u32, k: u32) -> Result<Self> {
        ensure!(
            (1..=16).contains(&k),
            ValidationError::range("equihash.k", format!("k={k} outside [1, 16]"))
        );
        ensure!(
            n > 0 && n % (k + 1) == 0,
            ValidationError::range("equihash.n", format!("n={n} is not a multiple of k+1"))
        );
        let params = Self { n, k };
        ensure!(
            params.collision_bits() < 32,
            ValidationError::range("equihash.n", format!("collision width of n={n} exceeds 31 bits"))
        );
        Ok(params)
    }

    /// Network parameters
    pub fn from_config(config: &ProtocolConfig) -> Result<Self> {
        Self::new(config.equihash_n, config.equihash_k)
    }

    /// Bits cleared per round
    pub fn collision_bits(&self) -> u32 {
        self.n / (self.k + 1)
    }

    /// Indices in a solution
    pub fn solution_len(&self) -> usize {
        1usize << self.k
    }

    /// Exclusive upper bound of index values
    pub fn index_space(&self) -> u64 {
        1u64 << (self.collision_bits() + 1)
    }

    fn hash_len(&self) -> usize {
        self.n.div_ceil(8) as usize
    }
}

/// Solved Equihash instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Hash width in bits
    pub n: u32,
    /// Number of collision rounds
    pub k: u32,
    /// Seed the index hashes commit to
    pub seed: Digest,
    /// Solver nonce that produced a solution for `seed`
    pub nonce: u32,
    /// Solution indices in tree order
    pub inputs: Vec<u32>,
}

fn index_hash(params: EquihashParams, seed: &Digest, nonce: u32, index: u32) -> Vec<u8> {
    let mut hasher = blake3::Hasher::new_derive_key(HASH_CONTEXT);
    hasher
        .update(&params.n.to_le_bytes())
        .update(&params.k.to_le_bytes())
        .update(seed.as_bytes())
        .update(&nonce.to_le_bytes())
        .update(&index.to_le_bytes());
    let mut out = vec![0u8; params.hash_len()];
    hasher.finalize_xof().fill(&mut out);
    let spare = params.hash_len() as u32 * 8 - params.n;
    if spare > 0 {
        if let Some(last) = out.last_mut() {
            *last &= 0xffu8 << spare;
        }
    }
    out
}

/// `width` bits starting at bit `start`, most significant first
fn bit_window(hash: &[u8], start: u32, width: u32) -> u64 {
    (start..start + width).fold(0u64, |acc, bit| {
        let byte = hash.get((bit / 8) as usize).copied().unwrap_or(0);
        (acc << 1) | u64::from((byte >> (7 - bit % 8)) & 1)
    })
}

fn has_zero_prefix(hash: &[u8], bits: u32) -> bool {
    let full = (bits / 8) as usize;
    let rem = bits % 8;
    hash.iter().take(full).all(|b| *b == 0)
        && (rem == 0 || hash.get(full).map_or(true, |b| b & (0xffu8 << (8 - rem)) == 0))
}

fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// One solver round's rows, packed into two flat arenas
///
/// Row `i` owns `hashes[i * hash_len..][..hash_len]` and
/// `indices[i * width..][..width]`.
struct RowTable {
    hash_len: usize,
    width: usize,
    hashes: Vec<u8>,
    indices: Vec<u32>,
}

impl RowTable {
    fn with_capacity(hash_len: usize, width: usize, rows: usize) -> Self {
        Self {
            hash_len,
            width,
            hashes: Vec::with_capacity(rows * hash_len),
            indices: Vec::with_capacity(rows * width),
        }
    }

    /// Leaf rows: one index hash per index
    fn leaves(params: EquihashParams, seed: &Digest, nonce: u32) -> Self {
        let count = params.index_space() as usize;
        let mut table = Self::with_capacity(params.hash_len(), 1, count);
        for index in 0..count as u32 {
            table
                .hashes
                .extend_from_slice(&index_hash(params, seed, nonce, index));
            table.indices.push(index);
        }
        table
    }

    fn len(&self) -> usize {
        self.indices.len() / self.width
    }

    fn hash(&self, row: usize) -> &[u8] {
        &self.hashes[row * self.hash_len..(row + 1) * self.hash_len]
    }

    fn indices(&self, row: usize) -> &[u32] {
        &self.indices[row * self.width..(row + 1) * self.width]
    }

    /// Append the merge of rows `a` and `b` of `source` if their index sets
    /// are disjoint, smaller leading index first
    fn push_combined(&mut self, source: &RowTable, a: usize, b: usize) -> bool {
        let (ia, ib) = (source.indices(a), source.indices(b));
        if ia.iter().any(|i| ib.contains(i)) {
            return false;
        }
        let (left, right) = if ia.first() < ib.first() { (ia, ib) } else { (ib, ia) };
        self.indices.extend_from_slice(left);
        self.indices.extend_from_slice(right);
        self.hashes.extend(
            source
                .hash(a)
                .iter()
                .zip(source.hash(b))
                .map(|(x, y)| x ^ y),
        );
        true
    }

    /// Row numbers sorted on a bit window, cut into runs sharing the window
    fn collision_groups(&self, start: u32, width: u32) -> Vec<Vec<usize>> {
        let mut keyed: Vec<(u64, usize)> = (0..self.len())
            .map(|row| (bit_window(self.hash(row), start, width), row))
            .collect();
        keyed.sort_unstable();
        let mut groups = Vec::new();
        let mut begin = 0;
        for end in 1..=keyed.len() {
            if end == keyed.len() || keyed[end].0 != keyed[begin].0 {
                if end - begin > 1 {
                    groups.push(keyed[begin..end].iter().map(|(_, row)| *row).collect());
                }
                begin = end;
            }
        }
        groups
    }
}

fn solve_with_nonce(params: EquihashParams, seed: &Digest, nonce: u32) -> Option<Vec<u32>> {
    let c = params.collision_bits();
    let mut rows = RowTable::leaves(params, seed, nonce);
    let row_limit = rows.len().saturating_mul(ROW_LIMIT_FACTOR);

    for round in 1..params.k {
        let mut next = RowTable::with_capacity(rows.hash_len, rows.width * 2, rows.len());
        'groups: for group in rows.collision_groups((round - 1) * c, c) {
            for (pos, &a) in group.iter().enumerate() {
                for &b in &group[pos + 1..] {
                    if next.push_combined(&rows, a, b) && next.len() >= row_limit {
                        break 'groups;
                    }
                }
            }
        }
        trace!(round, rows = next.len(), "Equihash round complete");
        if next.len() == 0 {
            return None;
        }
        rows = next;
    }

    // The last round clears the final two windows at once.
    let mut last = RowTable::with_capacity(rows.hash_len, rows.width * 2, 1);
    for group in rows.collision_groups((params.k - 1) * c, 2 * c) {
        for (pos, &a) in group.iter().enumerate() {
            for &b in &group[pos + 1..] {
                if last.push_combined(&rows, a, b) {
                    let row = last.len() - 1;
                    if has_zero_prefix(last.hash(row), params.n) {
                        return Some(last.indices(row).to_vec());
                    }
                }
            }
        }
    }
    None
}

/// Search solver nonces from zero until a solution for `seed` turns up
pub fn solve(params: EquihashParams, seed: &Digest) -> Result<Proof> {
    for nonce in 0..MAX_SOLVER_ATTEMPTS {
        if let Some(inputs) = solve_with_nonce(params, seed, nonce) {
            debug!(n = params.n, k = params.k, nonce, "Found equihash solution");
            return Ok(Proof {
                n: params.n,
                k: params.k,
                seed: *seed,
                nonce,
                inputs,
            });
        }
    }
    Err(ValidationError::crypto(format!(
        "no equihash solution within {MAX_SOLVER_ATTEMPTS} solver nonces"
    )))
}

impl Proof {
    /// Check the solution against its own parameters and seed
    pub fn verify(&self) -> Result<()> {
        let params = EquihashParams::new(self.n, self.k)?;
        ensure!(
            self.inputs.len() == params.solution_len(),
            ValidationError::crypto(format!(
                "solution has {} indices, expected {}",
                self.inputs.len(),
                params.solution_len()
            ))
        );
        ensure!(
            self.inputs.iter().all(|i| u64::from(*i) < params.index_space()),
            ValidationError::crypto("solution index out of range")
        );
        let mut sorted = self.inputs.clone();
        sorted.sort_unstable();
        sorted.dedup();
        ensure!(
            sorted.len() == self.inputs.len(),
            ValidationError::crypto("solution repeats an index")
        );
        self.subtree_hash(params, &self.inputs)?;
        Ok(())
    }

    /// Whether [`Proof::verify`] succeeds
    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    fn subtree_hash(&self, params: EquihashParams, indices: &[u32]) -> Result<Vec<u8>> {
        if let [index] = indices {
            return Ok(index_hash(params, &self.seed, self.nonce, *index));
        }
        let (left, right) = indices.split_at(indices.len() / 2);
        ensure!(
            left.first() < right.first(),
            ValidationError::crypto("solution subtrees are out of order")
        );
        let combined = xor(
            &self.subtree_hash(params, left)?,
            &self.subtree_hash(params, right)?,
        );
        let level = indices.len().trailing_zeros();
        let required = if level < params.k {
            level * params.collision_bits()
        } else {
            params.n
        };
        ensure!(
            has_zero_prefix(&combined, required),
            ValidationError::crypto(format!("no collision at level {level}"))
        );
        Ok(combined)
    }
}
