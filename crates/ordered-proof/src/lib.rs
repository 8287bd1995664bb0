//! # Ordered Merkle Proofs
//!
//! Position-aware Merkle inclusion proofs over keccak-256.
//!
//! A plain Merkle proof that sorts or otherwise canonicalizes sibling order
//! admits a reordering forgery: swapping two sibling entries can make two
//! different leaf sets hash to the same root. An *ordered* proof carries an
//! explicit left/right position bit for every sibling, so any reordering of
//! the sibling list (without flipping the matching bits) changes the folded
//! hash and fails verification.
//!
//! ## Components
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`verify`] | Fold a leaf up to a root using siblings + position bits |
//! | [`OrderedTree`] | Build a tree over a leaf set; produce root and proofs |
//! | [`keccak256`] / [`hash_pair`] | The single hashing primitive |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use sha3::{Digest, Keccak256};
use thiserror::Error;

/// A 32-byte keccak-256 digest.
pub type Hash = [u8; 32];

/// Errors from proof construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// Requested a proof for a leaf index past the end of the leaf set.
    #[error("leaf index out of range: {index} >= {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of leaves in the tree.
        len: usize,
    },

    /// Attempted to build a tree over zero leaves.
    #[error("cannot build a tree over an empty leaf set")]
    EmptyLeafSet,
}

/// Hash arbitrary bytes with keccak-256 (one-shot).
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Hash two nodes together, left then right.
#[must_use]
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Verify an ordered inclusion proof.
///
/// `position_bits[i] == true` means `siblings[i]` sits on the *left* of the
/// running hash at level `i`; `false` means it sits on the right.
///
/// # Algorithm
///
/// 1. Start with `leaf` as the running hash
/// 2. For each sibling, combine according to its position bit
/// 3. The final hash must equal `root`
///
/// Edge cases: a sibling/bit length mismatch always fails; an empty proof is
/// valid iff `leaf == root` (single-leaf tree).
///
/// # Time Complexity: O(log n)
/// # Space Complexity: O(1)
#[must_use]
pub fn verify(siblings: &[Hash], position_bits: &[bool], root: Hash, leaf: Hash) -> bool {
    if siblings.len() != position_bits.len() {
        return false;
    }

    if siblings.is_empty() {
        return leaf == root;
    }

    let mut current = leaf;
    for (sibling, on_left) in siblings.iter().zip(position_bits.iter().copied()) {
        current = if on_left {
            hash_pair(sibling, &current)
        } else {
            hash_pair(&current, sibling)
        };
    }

    current == root
}

/// A Merkle tree built over an ordered leaf set.
///
/// Odd nodes at any level are paired with a duplicate of themselves, so the
/// tree is total over any non-empty leaf count.
#[derive(Debug, Clone)]
pub struct OrderedTree {
    /// All levels, leaves first. `levels[last]` has exactly one node: the root.
    levels: Vec<Vec<Hash>>,
}

impl OrderedTree {
    /// Build a tree over the given leaves.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::EmptyLeafSet`] if `leaves` is empty.
    pub fn build(leaves: &[Hash]) -> Result<Self, ProofError> {
        if leaves.is_empty() {
            return Err(ProofError::EmptyLeafSet);
        }

        let mut levels: Vec<Vec<Hash>> = vec![leaves.to_vec()];

        while levels.last().map_or(0, Vec::len) > 1 {
            let current = levels.last().map_or(&[][..], Vec::as_slice);
            let mut next = Vec::with_capacity(current.len().div_ceil(2));

            for chunk in current.chunks(2) {
                let left = &chunk[0];
                let right = chunk.get(1).unwrap_or(left); // Duplicate last if odd
                next.push(hash_pair(left, right));
            }

            levels.push(next);
        }

        Ok(Self { levels })
    }

    /// The tree root.
    #[must_use]
    pub fn root(&self) -> Hash {
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Produce the ordered proof for the leaf at `index`.
    ///
    /// Returns the sibling list and the parallel position-bit list, leaves
    /// first, ready for [`verify`].
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IndexOutOfRange`] for an index past the leaf set.
    pub fn proof_for(&self, index: usize) -> Result<(Vec<Hash>, Vec<bool>), ProofError> {
        let len = self.leaf_count();
        if index >= len {
            return Err(ProofError::IndexOutOfRange { index, len });
        }

        let mut siblings = Vec::new();
        let mut position_bits = Vec::new();
        let mut idx = index;

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
            let sibling = level.get(sibling_idx).unwrap_or(&level[idx]);

            siblings.push(*sibling);
            // A left sibling means our node is the right child.
            position_bits.push(idx % 2 == 1);

            idx /= 2;
        }

        Ok((siblings, position_bits))
    }
}
