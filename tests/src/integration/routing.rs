//! # Hot-Path Scenarios
//!
//! Code-identity gating, DoS guards, and verbatim failure propagation on
//! the per-call routing path.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use router_core::prelude::*;

    fn routed_harness() -> (Harness, RouteUpdate) {
        let mut h = Harness::new();
        let update = RouteUpdate {
            selector: sel(1),
            module: addr(0x10),
            code_identity: h.deploy_echo(addr(0x10), 0x10),
        };
        let manifest = Manifest::build(vec![update]);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();
        h.router
            .apply_routes(SUBMITTER, &manifest.updates, &manifest.proofs())
            .unwrap();
        (h, update)
    }

    #[test]
    fn test_code_swap_after_registration_is_fatal() {
        let (mut h, update) = routed_harness();

        // Works before the swap.
        h.router.route(ANYONE, &calldata(sel(1), 0x01)).unwrap();

        // Swap the module's deployed code; next call must refuse to execute.
        h.host.swap_code(update.module, vec![0xEE, 0xEE]);
        let err = h.router.route(ANYONE, &calldata(sel(1), 0x02)).unwrap_err();
        match err {
            RouterError::CodeIdentityMismatch {
                module, expected, ..
            } => {
                assert_eq!(module, update.module);
                assert_eq!(expected, update.code_identity);
            }
            other => panic!("unexpected: {other:?}"),
        }

        // Restoring the original code restores routing.
        h.host.swap_code(update.module, vec![0x10, 0x60, 0x80, 0x52]);
        h.router.route(ANYONE, &calldata(sel(1), 0x03)).unwrap();
    }

    #[test]
    fn test_undeployed_module_is_fatal() {
        let (mut h, update) = routed_harness();
        h.host.undeploy(update.module);
        assert_eq!(
            h.router.route(ANYONE, &calldata(sel(1), 0)).unwrap_err(),
            RouterError::NoCode {
                module: update.module
            }
        );
    }

    #[test]
    fn test_failure_payload_propagated_verbatim() {
        let mut h = Harness::new();
        let payload = vec![0x08, 0xC3, 0x79, 0xA0, b'b', b'o', b'o', b'm'];
        let update = RouteUpdate {
            selector: sel(4),
            module: addr(0x40),
            code_identity: h.deploy_failing(addr(0x40), 0x40, payload.clone()),
        };
        let manifest = Manifest::build(vec![update]);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();
        h.router
            .apply_routes(SUBMITTER, &manifest.updates, &manifest.proofs())
            .unwrap();

        assert_eq!(
            h.router.route(ANYONE, &calldata(sel(4), 0)).unwrap_err(),
            RouterError::ModuleFailed { payload }
        );
        assert_eq!(h.router.stats().calls_failed, 1);
    }

    #[test]
    fn test_return_ceiling_exact_boundary() {
        let mut h = Harness::new();
        let max = h.config.max_return_bytes;

        let code = vec![0x50];
        h.host.deploy(
            addr(0x50),
            code.clone(),
            std::sync::Arc::new(move |data: &[u8]| {
                // Payload byte picks the response size: 0 = exactly max, 1 = max+1.
                let size = if data.ends_with(&[1]) { max + 1 } else { max };
                Ok(vec![0u8; size])
            }),
        );
        let update = RouteUpdate {
            selector: sel(5),
            module: addr(0x50),
            code_identity: code_identity_of(&code),
        };
        let manifest = Manifest::build(vec![update]);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();
        h.router
            .apply_routes(SUBMITTER, &manifest.updates, &manifest.proofs())
            .unwrap();

        // Exactly at the ceiling passes.
        let output = h.router.route(ANYONE, &calldata(sel(5), 0)).unwrap();
        assert_eq!(output.len(), max);

        // One byte over is a hard reject, not a truncation.
        assert_eq!(
            h.router.route(ANYONE, &calldata(sel(5), 1)).unwrap_err(),
            RouterError::ReturnDataTooLarge { size: max + 1, max }
        );

        // The event stream mirrors delivered outcomes: the oversize call is
        // recorded as a failure, never as a success.
        let events = h.sink.events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, RouterEvent::CallRouted { success: true, .. }))
                .count(),
            1
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, RouterEvent::CallRouted { success: false, .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_code_size_ceiling_enforced_at_apply() {
        let mut h = Harness::new();
        let max = h.config.max_code_bytes;

        let code = vec![0x5B; max + 1];
        h.host.deploy(
            addr(0x60),
            code.clone(),
            std::sync::Arc::new(|_| Ok(vec![])),
        );
        let update = RouteUpdate {
            selector: sel(6),
            module: addr(0x60),
            code_identity: code_identity_of(&code),
        };
        let manifest = Manifest::build(vec![update]);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();

        assert_eq!(
            h.router
                .apply_routes(SUBMITTER, &manifest.updates, &manifest.proofs())
                .unwrap_err(),
            RouterError::CodeTooLarge { size: max + 1, max }
        );
        assert!(h.router.modules().is_empty());
    }

    #[test]
    fn test_code_size_at_ceiling_accepted() {
        let mut h = Harness::new();
        let max = h.config.max_code_bytes;

        let code = vec![0x5B; max];
        h.host.deploy(
            addr(0x61),
            code.clone(),
            std::sync::Arc::new(|data: &[u8]| Ok(data.to_vec())),
        );
        let update = RouteUpdate {
            selector: sel(7),
            module: addr(0x61),
            code_identity: code_identity_of(&code),
        };
        let manifest = Manifest::build(vec![update]);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();
        h.router
            .apply_routes(SUBMITTER, &manifest.updates, &manifest.proofs())
            .unwrap();

        h.router.route(ANYONE, &calldata(sel(7), 0)).unwrap();
    }

    #[test]
    fn test_introspection_views_track_table() {
        let mut h = Harness::new();
        let updates = vec![
            RouteUpdate {
                selector: sel(1),
                module: addr(0x10),
                code_identity: h.deploy_echo(addr(0x10), 0x10),
            },
            RouteUpdate {
                selector: sel(2),
                module: addr(0x10),
                code_identity: h.deploy_echo(addr(0x10), 0x10),
            },
            RouteUpdate {
                selector: sel(3),
                module: addr(0x20),
                code_identity: h.deploy_echo(addr(0x20), 0x20),
            },
        ];
        let manifest = Manifest::build(updates);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();
        h.router
            .apply_routes(SUBMITTER, &manifest.updates, &manifest.proofs())
            .unwrap();

        assert_eq!(h.router.modules(), vec![addr(0x10), addr(0x20)]);
        assert_eq!(h.router.selectors_of(addr(0x10)), vec![sel(1), sel(2)]);
        assert_eq!(h.router.module_of(sel(3)), Some(addr(0x20)));
        assert_eq!(
            h.router.snapshot(),
            vec![
                (addr(0x10), vec![sel(1), sel(2)]),
                (addr(0x20), vec![sel(3)]),
            ]
        );

        h.router.remove_routes(RESPONDER, &[sel(1), sel(2)]).unwrap();
        assert_eq!(h.router.modules(), vec![addr(0x20)]);
        assert!(h.router.selectors_of(addr(0x10)).is_empty());
    }

    #[test]
    fn test_call_routed_events_carry_outcome() {
        let (mut h, update) = routed_harness();
        h.sink.clear();

        h.router.route(ANYONE, &calldata(sel(1), 0)).unwrap();
        h.host.swap_code(update.module, vec![0xBA]);
        let _ = h.router.route(ANYONE, &calldata(sel(1), 0));

        let events = h.sink.events();
        // The successful call emitted; the identity-mismatch call failed
        // before execution and emitted nothing.
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, RouterEvent::CallRouted { success: true, .. }))
                .count(),
            1
        );
    }
}
