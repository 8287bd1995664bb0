//! # Execution Queue Scenarios
//!
//! Replay resistance, parameter-substitution resistance, the eta floor, and
//! exactly-once consumption independent of the operation's outcome.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use router_core::prelude::*;

    /// Route sel(1) to an echo module so queued operations have a target.
    fn harness_with_route() -> Harness {
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
        h
    }

    #[test]
    fn test_replay_resistance() {
        let mut h = harness_with_route();
        let data = calldata(sel(1), 0x01);
        let min = h.router.governance().min_delay;

        let nonce = h.router.queue_operation(EXECUTOR, &data, T0 + min).unwrap();
        h.clock.set(T0 + min);
        h.router.execute_operation(ANYONE, nonce, &data, 0).unwrap();

        // Second execution: the entry no longer exists.
        assert_eq!(
            h.router.execute_operation(ANYONE, nonce, &data, 0).unwrap_err(),
            RouterError::UnknownOperation { nonce }
        );
    }

    #[test]
    fn test_substituted_data_fails_before_first_execution() {
        let mut h = harness_with_route();
        let data = calldata(sel(1), 0x01);
        let other = calldata(sel(1), 0x02);
        let min = h.router.governance().min_delay;

        let nonce = h.router.queue_operation(EXECUTOR, &data, T0 + min).unwrap();

        // Wrong payload is rejected as a data mismatch even while the eta
        // has not passed, and leaves the entry intact.
        assert_eq!(
            h.router.execute_operation(ANYONE, nonce, &other, 0).unwrap_err(),
            RouterError::OperationDataMismatch { nonce }
        );
        assert!(h.router.queued_operation(nonce).is_some());

        h.clock.set(T0 + min);
        assert_eq!(
            h.router.execute_operation(ANYONE, nonce, &other, 0).unwrap_err(),
            RouterError::OperationDataMismatch { nonce }
        );
        h.router.execute_operation(ANYONE, nonce, &data, 0).unwrap();
    }

    #[test]
    fn test_eta_floor_enforced_at_queue_time() {
        let mut h = harness_with_route();
        let min = h.router.governance().min_delay;

        assert_eq!(
            h.router
                .queue_operation(EXECUTOR, &calldata(sel(1), 0), T0 + min - 1)
                .unwrap_err(),
            RouterError::EtaTooSoon {
                eta: T0 + min - 1,
                earliest: T0 + min
            }
        );
    }

    #[test]
    fn test_queue_requires_executor_role() {
        let mut h = harness_with_route();
        assert!(matches!(
            h.router
                .queue_operation(ANYONE, &calldata(sel(1), 0), T0 + 1_000_000)
                .unwrap_err(),
            RouterError::Unauthorized {
                role: Role::Executor,
                ..
            }
        ));
    }

    #[test]
    fn test_failed_operation_still_consumed() {
        let mut h = Harness::new();
        let payload = vec![0xEE];
        let update = RouteUpdate {
            selector: sel(2),
            module: addr(0x20),
            code_identity: h.deploy_failing(addr(0x20), 0x20, payload.clone()),
        };
        let manifest = Manifest::build(vec![update]);
        h.router.commit_manifest(GOV, manifest.root(), 1).unwrap();
        h.router
            .apply_routes(SUBMITTER, &manifest.updates, &manifest.proofs())
            .unwrap();

        let data = calldata(sel(2), 0);
        let min = h.router.governance().min_delay;
        let nonce = h.router.queue_operation(EXECUTOR, &data, T0 + min).unwrap();

        h.clock.set(T0 + min);
        assert_eq!(
            h.router.execute_operation(ANYONE, nonce, &data, 3).unwrap_err(),
            RouterError::ModuleFailed { payload }
        );

        // Consumed despite the failure; no second attempt.
        assert!(h.router.queued_operation(nonce).is_none());
        assert_eq!(
            h.router.execute_operation(ANYONE, nonce, &data, 3).unwrap_err(),
            RouterError::UnknownOperation { nonce }
        );

        let events = h.sink.events();
        assert!(events.iter().any(|e| matches!(
            e,
            RouterEvent::OperationExecuted {
                success: false,
                tip_refunded: 3,
                ..
            }
        )));
    }

    #[test]
    fn test_nonces_order_across_operations() {
        let mut h = harness_with_route();
        let min = h.router.governance().min_delay;

        let a = h
            .router
            .queue_operation(EXECUTOR, &calldata(sel(1), 1), T0 + min)
            .unwrap();
        let b = h
            .router
            .queue_operation(EXECUTOR, &calldata(sel(1), 2), T0 + min)
            .unwrap();
        assert_eq!((a, b), (0, 1));

        // Consuming a never frees its nonce.
        h.clock.set(T0 + min);
        h.router
            .execute_operation(ANYONE, a, &calldata(sel(1), 1), 0)
            .unwrap();
        let c = h
            .router
            .queue_operation(EXECUTOR, &calldata(sel(1), 3), T0 + min + min)
            .unwrap();
        assert_eq!(c, 2);
    }
}
