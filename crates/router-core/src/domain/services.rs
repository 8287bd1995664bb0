//! # Domain Services
//!
//! Pure hashing helpers shared by the lifecycle, queue, and routing logic.
//! All hashing is keccak-256; the leaf and commitment encodings below are the
//! canonical forms the proof verifier and execution queue operate over.

use crate::domain::value_objects::{Address, Hash, Selector};
use sha3::{Digest, Keccak256};

/// Hash arbitrary bytes with keccak-256.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash::new(out)
}

/// Canonical manifest leaf: `keccak256(selector || module || code_identity)`.
///
/// This is the exact encoding apply-batch proofs are verified against; any
/// party producing manifests off-line must hash the same 56-byte layout.
#[must_use]
pub fn leaf_of(selector: Selector, module: Address, code_identity: Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(selector.as_bytes());
    hasher.update(module.as_bytes());
    hasher.update(code_identity.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash::new(out)
}

/// Commitment hash for a queued operation's calldata.
#[must_use]
pub fn operation_hash(data: &[u8]) -> Hash {
    keccak256(data)
}

/// Content hash of a module's deployed code.
///
/// Recomputed by the host at every use; no earlier value is trusted.
#[must_use]
pub fn code_identity_of(code: &[u8]) -> Hash {
    keccak256(code)
}
