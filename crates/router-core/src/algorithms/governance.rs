//! # Governance & Timelock
//!
//! Two roles: `governance` (ordinary control) and `guardian` (safety only).
//! Governance rotation is two-phase: queue, then execute once the eta has
//! passed. The guardian may pause immediately and may *queue* an emergency
//! rotation, but that rotation goes through the same timelock, so the
//! guardian can never seize control instantly.

use crate::domain::entities::PendingRotation;
use crate::domain::value_objects::Address;
use crate::errors::RouterError;
use serde::{Deserialize, Serialize};

/// Governance identities plus the single pending-rotation slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceState {
    /// Current governance identity.
    pub governance: Address,
    /// Guardian identity (break-glass).
    pub guardian: Address,
    /// At most one rotation pending at a time.
    pub pending: Option<PendingRotation>,
    /// Minimum timelock delay (seconds) for rotations and queued operations.
    pub min_delay: u64,
}

impl GovernanceState {
    /// Deployment state with the given identities and timelock floor.
    ///
    /// # Errors
    ///
    /// `ZeroAddress` if either identity is zero.
    pub fn new(governance: Address, guardian: Address, min_delay: u64) -> Result<Self, RouterError> {
        if governance.is_zero() {
            return Err(RouterError::ZeroAddress {
                context: "governance",
            });
        }
        if guardian.is_zero() {
            return Err(RouterError::ZeroAddress { context: "guardian" });
        }
        Ok(Self {
            governance,
            guardian,
            pending: None,
            min_delay,
        })
    }

    /// Queue a governance rotation (ordinary path).
    ///
    /// # Errors
    ///
    /// `ZeroAddress` or `RotationAlreadyPending`.
    pub fn queue_rotation(&mut self, new_governance: Address, now: u64) -> Result<u64, RouterError> {
        self.queue_inner(new_governance, now, false)
    }

    /// Queue a governance rotation proposed by the guardian.
    ///
    /// Same single slot, same delay; only the provenance differs.
    ///
    /// # Errors
    ///
    /// `ZeroAddress` or `RotationAlreadyPending`.
    pub fn queue_guardian_rotation(
        &mut self,
        new_governance: Address,
        now: u64,
    ) -> Result<u64, RouterError> {
        self.queue_inner(new_governance, now, true)
    }

    fn queue_inner(
        &mut self,
        new_governance: Address,
        now: u64,
        queued_by_guardian: bool,
    ) -> Result<u64, RouterError> {
        if new_governance.is_zero() {
            return Err(RouterError::ZeroAddress {
                context: "new governance",
            });
        }
        if self.pending.is_some() {
            return Err(RouterError::RotationAlreadyPending);
        }

        let eta = now + self.min_delay;
        self.pending = Some(PendingRotation {
            new_governance,
            eta,
            queued_by_guardian,
        });
        Ok(eta)
    }

    /// Execute the pending rotation once its eta has passed.
    ///
    /// Returns `(old, new)` so the caller can atomically move the
    /// governance-scoped capabilities across identities.
    ///
    /// # Errors
    ///
    /// `NoPendingRotation` or `RotationNotReady { eta, now }`.
    pub fn execute_rotation(&mut self, now: u64) -> Result<(Address, Address), RouterError> {
        let pending = self.pending.ok_or(RouterError::NoPendingRotation)?;

        if now < pending.eta {
            return Err(RouterError::RotationNotReady {
                eta: pending.eta,
                now,
            });
        }

        let old = self.governance;
        self.governance = pending.new_governance;
        self.pending = None;
        Ok((old, pending.new_governance))
    }

    /// Change the timelock floor within the configured bounds.
    ///
    /// # Errors
    ///
    /// `DelayOutOfBounds`.
    pub fn set_min_delay(&mut self, new_delay: u64, min: u64, max: u64) -> Result<(), RouterError> {
        if new_delay < min || new_delay > max {
            return Err(RouterError::DelayOutOfBounds {
                requested: new_delay,
                min,
                max,
            });
        }
        self.min_delay = new_delay;
        Ok(())
    }
}
