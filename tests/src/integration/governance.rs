//! # Governance Scenarios
//!
//! Two-phase rotation with capability movement, the guardian's delayed
//! emergency path, and timelock bound enforcement.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use router_core::prelude::*;

    const NEW_GOV: Address = Address::new([0xF6; 20]);

    #[test]
    fn test_rotation_two_phase_flow() {
        let mut h = Harness::new();

        let eta = h.router.queue_rotate_governance(GOV, NEW_GOV).unwrap();
        assert_eq!(eta, T0 + h.config.min_timelock_delay);

        // Not ready: exact timestamps reported.
        assert_eq!(
            h.router.execute_rotate_governance(ANYONE).unwrap_err(),
            RouterError::RotationNotReady { eta, now: T0 }
        );

        h.clock.set(eta);
        h.router.execute_rotate_governance(ANYONE).unwrap();

        // Capabilities moved atomically with the identity.
        assert!(h.permissions.has_role(Role::Governance, NEW_GOV));
        assert!(!h.permissions.has_role(Role::Governance, GOV));
        assert_eq!(h.router.governance().governance, NEW_GOV);

        // The old identity is powerless; the new one governs.
        assert!(matches!(
            h.router.commit_manifest(GOV, Hash::new([1u8; 32]), 1).unwrap_err(),
            RouterError::Unauthorized { .. }
        ));
        h.router
            .commit_manifest(NEW_GOV, Hash::new([1u8; 32]), 1)
            .unwrap();
    }

    #[test]
    fn test_rotation_slot_is_single() {
        let mut h = Harness::new();
        h.router.queue_rotate_governance(GOV, NEW_GOV).unwrap();
        assert_eq!(
            h.router.queue_rotate_governance(GOV, addr(0x42)).unwrap_err(),
            RouterError::RotationAlreadyPending
        );
        assert_eq!(
            h.router.guardian_queue_rotate(GUARD, addr(0x42)).unwrap_err(),
            RouterError::RotationAlreadyPending
        );
    }

    #[test]
    fn test_guardian_cannot_rotate_instantly() {
        let mut h = Harness::new();

        let eta = h.router.guardian_queue_rotate(GUARD, NEW_GOV).unwrap();
        assert_eq!(eta, T0 + h.config.min_timelock_delay);

        // Guardian gains nothing by executing early.
        assert!(matches!(
            h.router.execute_rotate_governance(GUARD).unwrap_err(),
            RouterError::RotationNotReady { .. }
        ));

        h.clock.set(eta);
        h.router.execute_rotate_governance(GUARD).unwrap();
        assert_eq!(h.router.governance().governance, NEW_GOV);

        let events = h.sink.events();
        assert!(events.iter().any(|e| matches!(
            e,
            RouterEvent::GovernanceRotationQueued {
                queued_by_guardian: true,
                ..
            }
        )));
    }

    #[test]
    fn test_guardian_pause_is_immediate_but_nothing_else() {
        let mut h = Harness::new();

        h.router.guardian_pause(GUARD).unwrap();
        assert!(h.permissions.is_paused());

        // Guardian holds no governance capabilities.
        assert!(matches!(
            h.router.commit_manifest(GUARD, Hash::new([1u8; 32]), 1).unwrap_err(),
            RouterError::Unauthorized { .. }
        ));
        assert!(matches!(
            h.router.unpause(GUARD).unwrap_err(),
            RouterError::Unauthorized { .. }
        ));

        h.router.unpause(GOV).unwrap();
        assert!(!h.permissions.is_paused());
    }

    #[test]
    fn test_min_delay_bounds_enforced() {
        let mut h = Harness::new();
        let min = h.config.min_timelock_delay;
        let max = h.config.max_timelock_delay;

        assert_eq!(
            h.router.set_min_delay(GOV, min - 1).unwrap_err(),
            RouterError::DelayOutOfBounds {
                requested: min - 1,
                min,
                max
            }
        );
        assert_eq!(
            h.router.set_min_delay(GOV, max + 1).unwrap_err(),
            RouterError::DelayOutOfBounds {
                requested: max + 1,
                min,
                max
            }
        );

        h.router.set_min_delay(GOV, max).unwrap();
        assert_eq!(h.router.governance().min_delay, max);

        // The widened floor now governs rotation etas.
        let eta = h.router.queue_rotate_governance(GOV, NEW_GOV).unwrap();
        assert_eq!(eta, T0 + max);
    }

    #[test]
    fn test_zero_new_governance_rejected() {
        let mut h = Harness::new();
        assert_eq!(
            h.router.queue_rotate_governance(GOV, Address::ZERO).unwrap_err(),
            RouterError::ZeroAddress {
                context: "new governance"
            }
        );
    }

    #[test]
    fn test_execute_without_pending_rotation() {
        let mut h = Harness::new();
        assert_eq!(
            h.router.execute_rotate_governance(ANYONE).unwrap_err(),
            RouterError::NoPendingRotation
        );
    }
}
