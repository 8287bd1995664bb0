//! # Domain Entities
//!
//! Core records of the routing engine: routes, apply-batch entries, queued
//! operations, roles, and the lifecycle/lock enums.

use crate::domain::value_objects::{Address, Hash, Selector};
use serde::{Deserialize, Serialize};

// =============================================================================
// ROUTES
// =============================================================================

/// A registered route: the module a selector forwards to, and the code
/// identity the module must still carry at call time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Target module address.
    pub module: Address,
    /// Expected content hash of the module's deployed code.
    pub code_identity: Hash,
}

/// One entry of an apply batch: the route to write, proven against the
/// pending manifest root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteUpdate {
    /// Route key being added or overwritten.
    pub selector: Selector,
    /// Target module address.
    pub module: Address,
    /// Expected content hash of the module's deployed code.
    pub code_identity: Hash,
}

impl RouteUpdate {
    /// The route this update writes.
    #[must_use]
    pub const fn route(&self) -> Route {
        Route {
            module: self.module,
            code_identity: self.code_identity,
        }
    }
}

/// An ordered inclusion proof for one apply-batch entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteProof {
    /// Sibling hashes, leaves first.
    pub siblings: Vec<Hash>,
    /// Parallel left/right position bits; `true` = sibling on the left.
    pub position_bits: Vec<bool>,
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// One-way configuration lock.
///
/// Every configuration mutator guards on this; once `Frozen` the state never
/// returns to `Active`. Pause/unpause is not configuration and stays usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigLock {
    /// Configuration may be mutated through the permissioned entry points.
    #[default]
    Active,
    /// Configuration is permanently immutable.
    Frozen,
}

impl ConfigLock {
    /// Returns true once the lock has been engaged.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        matches!(self, Self::Frozen)
    }
}

/// Derived view of where the manifest state machine currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecyclePhase {
    /// No pending root.
    Idle,
    /// A root is committed; no routes applied against it yet.
    Committed,
    /// Some routes applied; more may follow.
    PartiallyApplied,
    /// The activation delay has elapsed; `activate` may run.
    ReadyToActivate,
}

// =============================================================================
// EXECUTION QUEUE
// =============================================================================

/// A deferred privileged operation, committed by hash at queue time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedOperation {
    /// Strictly increasing, never reused.
    pub nonce: u64,
    /// keccak-256 commitment to the operation calldata.
    pub operation_hash: Hash,
    /// Earliest execution time (unix seconds).
    pub eta: u64,
}

// =============================================================================
// ROLES
// =============================================================================

/// Capability roles checked against the permission oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Ordinary control: commit/activate/delay/freeze, rotation queueing.
    Governance,
    /// Safety-only: immediate pause, delayed rotation proposal.
    Guardian,
    /// May apply proven route batches against a pending root.
    Submitter,
    /// May queue deferred operations.
    Executor,
    /// May remove routes out-of-band (incident response).
    Emergency,
}

/// A queued governance rotation (single slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRotation {
    /// Identity that will receive the Governance role.
    pub new_governance: Address,
    /// Earliest execution time (unix seconds).
    pub eta: u64,
    /// Whether the guardian queued this rotation (break-glass path).
    pub queued_by_guardian: bool,
}
