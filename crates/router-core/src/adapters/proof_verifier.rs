//! Ordered-proof verifier adapter.

use crate::domain::value_objects::Hash;
use crate::ports::outbound::ProofVerifier;

/// Wraps the `ordered-proof` primitive behind the [`ProofVerifier`] port.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderedProofVerifier;

impl OrderedProofVerifier {
    /// New adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProofVerifier for OrderedProofVerifier {
    fn verify(&self, siblings: &[Hash], position_bits: &[bool], root: Hash, leaf: Hash) -> bool {
        let raw: Vec<ordered_proof::Hash> = siblings.iter().map(|h| h.0).collect();
        ordered_proof::verify(&raw, position_bits, root.0, leaf.0)
    }
}
