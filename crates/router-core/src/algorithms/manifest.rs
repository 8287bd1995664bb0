//! # Manifest Lifecycle
//!
//! The commit → apply → activate state machine guarding every route change.
//!
//! A proposed manifest is committed as a single root hash, routes are proven
//! and written against that root, and only after a mandatory delay does the
//! committed root become active. The split gives observers a window to detect
//! a malicious manifest before it takes effect.
//!
//! All transitions take `now` (unix seconds) explicitly so the machine is
//! pure and unit-testable without a host clock.

use crate::domain::entities::{ConfigLock, LifecyclePhase};
use crate::domain::value_objects::Hash;
use crate::errors::RouterError;
use serde::{Deserialize, Serialize};

/// The manifest state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestState {
    /// Root the router currently serves from.
    pub active_root: Hash,
    /// Committed-but-not-active root, if a commit is outstanding.
    pub pending_root: Option<Hash>,
    /// When the pending root was committed (unix seconds).
    pub committed_at: u64,
    /// Whether any routes were applied against the pending root.
    pub applied_against_pending: bool,
    /// Generation counter of the active manifest.
    pub active_epoch: u64,
    /// Mandatory wait between commit and activate (seconds).
    pub activation_delay: u64,
    /// Strictly increasing across every apply batch and activation.
    pub manifest_version: u64,
    /// One-way configuration lock.
    pub lock: ConfigLock,
}

impl ManifestState {
    /// Deployment state: epoch 0, version 1, nothing pending.
    #[must_use]
    pub fn new(activation_delay: u64) -> Self {
        Self {
            active_root: Hash::ZERO,
            pending_root: None,
            committed_at: 0,
            applied_against_pending: false,
            active_epoch: 0,
            activation_delay,
            manifest_version: 1,
            lock: ConfigLock::Active,
        }
    }

    /// True while a committed root awaits activation.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_root.is_some()
    }

    /// Earliest time `activate` may run, if a commit is outstanding.
    #[must_use]
    pub fn earliest_activation(&self) -> Option<u64> {
        self.pending_root
            .map(|_| self.committed_at + self.activation_delay)
    }

    /// Derived view of the machine's current phase.
    #[must_use]
    pub fn phase(&self, now: u64) -> LifecyclePhase {
        match self.pending_root {
            None => LifecyclePhase::Idle,
            Some(_) if now >= self.committed_at + self.activation_delay => {
                LifecyclePhase::ReadyToActivate
            }
            Some(_) if self.applied_against_pending => LifecyclePhase::PartiallyApplied,
            Some(_) => LifecyclePhase::Committed,
        }
    }

    /// Guard shared by every configuration mutator.
    fn ensure_unlocked(&self) -> Result<(), RouterError> {
        if self.lock.is_frozen() {
            return Err(RouterError::Frozen);
        }
        Ok(())
    }

    /// Commit a new manifest root for the next epoch.
    ///
    /// The epoch argument must be exactly `active_epoch + 1`, so proposals
    /// only ever move forward and history never rewinds. A still-pending root
    /// may be superseded by committing again for the same forward epoch; the
    /// activation clock restarts from the new commit.
    ///
    /// # Errors
    ///
    /// `Frozen`, `ZeroRoot`, or `EpochMismatch { expected, actual }`.
    pub fn commit(&mut self, root: Hash, epoch: u64, now: u64) -> Result<(), RouterError> {
        self.ensure_unlocked()?;

        if root.is_zero() {
            return Err(RouterError::ZeroRoot);
        }

        let expected = self.active_epoch + 1;
        if epoch != expected {
            return Err(RouterError::EpochMismatch {
                expected,
                actual: epoch,
            });
        }

        self.pending_root = Some(root);
        self.committed_at = now;
        self.applied_against_pending = false;
        Ok(())
    }

    /// Guard an apply batch: frozen and pending-root checks, returning the
    /// root the batch must prove against.
    ///
    /// # Errors
    ///
    /// `Frozen` or `NoPendingRoot`.
    pub fn pending_root_for_apply(&self) -> Result<Hash, RouterError> {
        self.ensure_unlocked()?;
        self.pending_root.ok_or(RouterError::NoPendingRoot)
    }

    /// Record a successful apply batch: one version bump per batch.
    pub fn mark_applied(&mut self) {
        self.applied_against_pending = true;
        self.manifest_version += 1;
    }

    /// Promote the pending root to active once the delay has elapsed.
    ///
    /// # Errors
    ///
    /// `Frozen`, `NoPendingRoot`, or `ActivationNotReady { earliest, now }`.
    pub fn activate(&mut self, now: u64) -> Result<(), RouterError> {
        self.ensure_unlocked()?;

        let pending = self.pending_root.ok_or(RouterError::NoPendingRoot)?;

        let earliest = self.committed_at + self.activation_delay;
        if now < earliest {
            return Err(RouterError::ActivationNotReady { earliest, now });
        }

        self.active_root = pending;
        self.active_epoch += 1;
        self.pending_root = None;
        self.committed_at = 0;
        self.applied_against_pending = false;
        self.manifest_version += 1;
        Ok(())
    }

    /// Change the activation delay within the configured bounds.
    ///
    /// # Errors
    ///
    /// `Frozen` or `DelayOutOfBounds`.
    pub fn set_activation_delay(
        &mut self,
        new_delay: u64,
        min: u64,
        max: u64,
    ) -> Result<(), RouterError> {
        self.ensure_unlocked()?;

        if new_delay < min || new_delay > max {
            return Err(RouterError::DelayOutOfBounds {
                requested: new_delay,
                min,
                max,
            });
        }

        self.activation_delay = new_delay;
        Ok(())
    }

    /// Engage the one-way configuration lock.
    ///
    /// # Errors
    ///
    /// `AlreadyFrozen` when called twice.
    pub fn freeze(&mut self) -> Result<(), RouterError> {
        if self.lock.is_frozen() {
            return Err(RouterError::AlreadyFrozen);
        }
        self.lock = ConfigLock::Frozen;
        Ok(())
    }

    /// Whether configuration mutation is still possible.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.lock.is_frozen()
    }
}
