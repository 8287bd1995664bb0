//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the routing engine depends on. External adapters implement
//! these traits to provide proof verification, module hosting, permission
//! checks, time, and event emission.
//!
//! All ports are synchronous: the host environment processes calls serially,
//! so there is no suspension point inside a call. The collaborators are
//! queried, never handed write access to engine state.

use crate::domain::entities::Role;
use crate::domain::value_objects::{Address, Bytes, Hash};
use crate::events::EventRecord;

// =============================================================================
// PROOF VERIFICATION
// =============================================================================

/// Ordered Merkle inclusion oracle.
///
/// Consumed as a black box: given a claimed root, a leaf, sibling hashes,
/// and parallel left/right position bits, decide inclusion. The position
/// bits defeat sibling-reordering forgeries.
pub trait ProofVerifier: Send + Sync {
    /// True iff `leaf` is included under `root` along the described path.
    fn verify(&self, siblings: &[Hash], position_bits: &[bool], root: Hash, leaf: Hash) -> bool;
}

// =============================================================================
// MODULE HOST
// =============================================================================

/// A module call that executed and failed.
///
/// The payload is the module's own error data, propagated verbatim to the
/// original caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleFailure {
    /// The module's error payload, untouched.
    pub payload: Bytes,
}

/// The host environment's view of deployed modules.
///
/// Code is always re-read at use time; the engine never trusts a code hash
/// computed earlier than the current call. Execution happens in the context
/// of the router's own persistent state, so module effects land under the
/// router's identity.
pub trait ModuleHost: Send + Sync {
    /// Deployed code at `module`, or None when nothing is deployed.
    fn code(&self, module: Address) -> Option<Bytes>;

    /// Execute `module` with `calldata`, forwarding all available budget.
    ///
    /// # Errors
    ///
    /// The module's own failure, payload intact.
    fn call(&self, module: Address, calldata: &[u8]) -> Result<Bytes, ModuleFailure>;
}

// =============================================================================
// PERMISSIONS
// =============================================================================

/// Role and pause-flag oracle.
///
/// Bookkeeping lives outside the engine; the engine only queries booleans
/// and, during governance rotation, moves capabilities atomically through
/// the grant/revoke pair.
pub trait PermissionOracle: Send + Sync {
    /// True iff `caller` currently holds `role`.
    fn has_role(&self, role: Role, caller: Address) -> bool;

    /// Grant `role` to `identity`.
    fn grant_role(&self, role: Role, identity: Address);

    /// Revoke `role` from `identity`.
    fn revoke_role(&self, role: Role, identity: Address);

    /// Global pause flag.
    fn is_paused(&self) -> bool;

    /// Set the global pause flag.
    fn set_paused(&self, paused: bool);
}

// =============================================================================
// TIME
// =============================================================================

/// Wall-clock source, injectable for deterministic tests.
pub trait Clock: Send + Sync {
    /// Current time in unix seconds.
    fn now_secs(&self) -> u64;
}

// =============================================================================
// EVENTS
// =============================================================================

/// Destination for observability events.
pub trait EventSink: Send + Sync {
    /// Emit one event record.
    fn emit(&self, record: EventRecord);
}
