//! # Ordered-Proof Soundness Scenarios
//!
//! The anti-reordering property exercised through the router's apply path,
//! not just the primitive: a proof whose siblings are reordered without
//! flipping the matching position bits must be rejected as invalid.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use router_core::prelude::*;

    fn eight_route_manifest(h: &Harness) -> Manifest {
        let updates: Vec<RouteUpdate> = (1..=8u8)
            .map(|i| {
                let module = addr(0x10 + i);
                RouteUpdate {
                    selector: sel(i),
                    module,
                    code_identity: h.deploy_echo(module, i),
                }
            })
            .collect();
        Manifest::build(updates)
    }

    #[test]
    fn test_sibling_swap_rejected_by_apply() {
        let mut h = Harness::new();
        let manifest = eight_route_manifest(&h);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();

        let mut proofs = manifest.proofs();
        // Entry 3's proof has depth 3; exchange its first two siblings
        // without touching the bits.
        proofs[3].siblings.swap(0, 1);

        assert_eq!(
            h.router
                .apply_routes(SUBMITTER, &manifest.updates, &proofs)
                .unwrap_err(),
            RouterError::InvalidProof {
                selector: manifest.updates[3].selector
            }
        );

        // Nothing from the rejected batch landed.
        assert!(h.router.modules().is_empty());
    }

    #[test]
    fn test_bit_flip_rejected_by_apply() {
        let mut h = Harness::new();
        let manifest = eight_route_manifest(&h);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();

        let mut proofs = manifest.proofs();
        proofs[5].position_bits[0] = !proofs[5].position_bits[0];

        assert!(matches!(
            h.router
                .apply_routes(SUBMITTER, &manifest.updates, &proofs)
                .unwrap_err(),
            RouterError::InvalidProof { .. }
        ));
    }

    #[test]
    fn test_proof_against_wrong_root_rejected() {
        let mut h = Harness::new();
        let manifest = eight_route_manifest(&h);

        // Commit a different root than the one the proofs were built for.
        h.router
            .commit_manifest(GOV, Hash::new([0x42; 32]), 1)
            .unwrap();

        assert!(matches!(
            h.router
                .apply_routes(SUBMITTER, &manifest.updates, &manifest.proofs())
                .unwrap_err(),
            RouterError::InvalidProof { .. }
        ));
    }

    #[test]
    fn test_proof_for_one_entry_does_not_admit_another() {
        let mut h = Harness::new();
        let manifest = eight_route_manifest(&h);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();

        // Pair entry 0 with entry 1's proof.
        let proofs = manifest.proofs();
        let mismatched = vec![proofs[1].clone()];

        assert_eq!(
            h.router
                .apply_routes(SUBMITTER, &manifest.updates[..1], &mismatched)
                .unwrap_err(),
            RouterError::InvalidProof {
                selector: manifest.updates[0].selector
            }
        );
    }

    #[test]
    fn test_proof_count_must_match_entry_count() {
        let mut h = Harness::new();
        let manifest = eight_route_manifest(&h);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();

        // Drop the last proof; the batch must be rejected before any
        // verification is attempted.
        let truncated = manifest.proofs()[..7].to_vec();
        assert_eq!(
            h.router
                .apply_routes(SUBMITTER, &manifest.updates, &truncated)
                .unwrap_err(),
            RouterError::ProofCountMismatch {
                updates: 8,
                proofs: 7
            }
        );
        assert!(h.router.modules().is_empty());
    }

    #[test]
    fn test_stale_code_proof_fails_fast_at_apply() {
        let mut h = Harness::new();
        let module = addr(0x10);
        let identity = h.deploy_echo(module, 0x10);
        let manifest = Manifest::build(vec![RouteUpdate {
            selector: sel(1),
            module,
            code_identity: identity,
        }]);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();

        // The module is redeployed between manifest construction and apply;
        // the proof is now for stale code and apply must fail fast.
        h.host.swap_code(module, vec![0x99, 0x99]);

        assert!(matches!(
            h.router
                .apply_routes(SUBMITTER, &manifest.updates, &manifest.proofs())
                .unwrap_err(),
            RouterError::CodeIdentityMismatch { .. }
        ));
    }
}
