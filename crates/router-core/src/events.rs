//! # Event Schema
//!
//! Observability events for external tooling. Every admin entry point stamps
//! its emissions with one correlation id, so a batch apply and the route
//! writes it caused can be tied together off-line.

use crate::domain::entities::Role;
use crate::domain::value_objects::{Address, Hash, Selector};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One emitted event plus its correlation id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    /// Groups the events of a single entry-point invocation.
    pub correlation_id: Uuid,
    /// The event payload.
    pub event: RouterEvent,
}

/// All events the routing engine emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouterEvent {
    /// A selector was routed for the first time.
    RouteAdded {
        /// The new route key.
        selector: Selector,
        /// Target module.
        module: Address,
        /// Registered code identity.
        code_identity: Hash,
    },
    /// An existing route was overwritten.
    RouteUpdated {
        /// The route key.
        selector: Selector,
        /// Previous target module.
        old_module: Address,
        /// New target module.
        module: Address,
        /// New code identity.
        code_identity: Hash,
    },
    /// A route was deleted by emergency removal.
    RouteRemoved {
        /// The removed route key.
        selector: Selector,
        /// The module it pointed at.
        module: Address,
    },
    /// A manifest root was committed for a future epoch.
    ManifestCommitted {
        /// The committed root.
        root: Hash,
        /// The epoch it targets.
        epoch: u64,
        /// Commit timestamp (unix seconds).
        committed_at: u64,
    },
    /// An apply batch was verified and written.
    RoutesApplied {
        /// The pending root the batch proved against.
        root: Hash,
        /// Entries written.
        count: usize,
        /// Version after the batch's bump.
        manifest_version: u64,
    },
    /// The pending root became active.
    ManifestActivated {
        /// The newly active root.
        root: Hash,
        /// The newly active epoch.
        epoch: u64,
        /// Version after the activation bump.
        manifest_version: u64,
    },
    /// A governance rotation entered the timelock.
    GovernanceRotationQueued {
        /// Identity that will take over.
        new_governance: Address,
        /// Earliest execution time.
        eta: u64,
        /// True when the guardian queued it.
        queued_by_guardian: bool,
    },
    /// A governance rotation executed.
    GovernanceRotationExecuted {
        /// Identity that lost the role.
        old_governance: Address,
        /// Identity that gained it.
        new_governance: Address,
    },
    /// The guardian halted the router.
    GuardianPaused {
        /// The guardian identity.
        guardian: Address,
    },
    /// The router resumed.
    Unpaused {
        /// Who resumed it.
        caller: Address,
    },
    /// An operation was committed for deferred execution.
    OperationQueued {
        /// Assigned nonce.
        nonce: u64,
        /// Commitment hash of the operation data.
        operation_hash: Hash,
        /// Earliest execution time.
        eta: u64,
    },
    /// A queued operation was consumed and run.
    OperationExecuted {
        /// The consumed nonce.
        nonce: u64,
        /// Whether the operation itself succeeded.
        success: bool,
        /// Tip refunded to the executor.
        tip_refunded: u64,
        /// The executor identity.
        executor: Address,
    },
    /// The one-way configuration lock engaged.
    ConfigFrozen {
        /// Who engaged it.
        caller: Address,
    },
    /// The activation delay changed.
    ActivationDelayChanged {
        /// Previous delay (seconds).
        old_delay: u64,
        /// New delay (seconds).
        new_delay: u64,
    },
    /// The timelock floor changed.
    MinDelayChanged {
        /// Previous floor (seconds).
        old_delay: u64,
        /// New floor (seconds).
        new_delay: u64,
    },
    /// A call was forwarded through the hot path.
    CallRouted {
        /// The matched route key.
        selector: Selector,
        /// The module that ran.
        module: Address,
        /// Whether the module succeeded.
        success: bool,
    },
    /// A capability was granted during rotation.
    RoleGranted {
        /// The capability.
        role: Role,
        /// Receiving identity.
        to: Address,
    },
    /// A capability was revoked during rotation.
    RoleRevoked {
        /// The capability.
        role: Role,
        /// Losing identity.
        from: Address,
    },
}
