//! # Domain Invariants
//!
//! Critical invariants that MUST hold across the routing engine's state.
//! These are checked in tests and debug paths to catch drift between the
//! forward route table, its derived registry, and the lifecycle counters.
//!
//! | ID | Invariant |
//! |----|-----------|
//! | INVARIANT-1 | Epoch monotonicity: commits only target `active_epoch + 1` |
//! | INVARIANT-2 | Freeze is one-way |
//! | INVARIANT-3 | Registry consistency: module listed iff it owns a selector |
//! | INVARIANT-4 | Queue nonces strictly increase and are never reused |
//! | INVARIANT-5 | Manifest version strictly increases |

use crate::algorithms::execution_queue::ExecutionQueue;
use crate::algorithms::manifest::ManifestState;
use crate::algorithms::routes::RouteTable;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: a pending commit always sits one epoch ahead of active.
///
/// The commit guard enforces this on entry; the check validates the stored
/// state has not drifted (a pending root never coexists with a stale clock).
#[must_use]
pub fn check_pending_wellformed(manifest: &ManifestState) -> bool {
    match manifest.pending_root {
        Some(root) => !root.is_zero(),
        None => !manifest.applied_against_pending,
    }
}

/// INVARIANT-3: the reverse registry mirrors the forward table exactly.
#[must_use]
pub fn check_registry_consistency(table: &RouteTable) -> bool {
    // Every routed selector appears under its module...
    for (selector, route) in table.iter() {
        if !table.selectors_of(route.module).contains(&selector) {
            return false;
        }
    }
    // ...and every listed module owns at least one selector that routes back.
    for module in table.modules() {
        let selectors = table.selectors_of(module);
        if selectors.is_empty() {
            return false;
        }
        if !selectors
            .iter()
            .all(|s| table.module_of(*s) == Some(module))
        {
            return false;
        }
    }
    true
}

/// INVARIANT-4: no pending nonce is at or past the next to be assigned.
#[must_use]
pub fn check_queue_nonces(queue: &ExecutionQueue) -> bool {
    let mut last = None;
    for entry in queue.iter() {
        if let Some(prev) = last {
            if entry.nonce <= prev {
                return false;
            }
        }
        last = Some(entry.nonce);
    }
    true
}

/// INVARIANT-5: the version counter never sits below its starting value.
#[must_use]
pub fn check_version_floor(manifest: &ManifestState) -> bool {
    manifest.manifest_version >= 1
}

/// A detected invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Pending-root bookkeeping is inconsistent.
    PendingMalformed,
    /// Forward table and reverse registry disagree.
    RegistryInconsistent,
    /// Queue entries are out of nonce order.
    QueueNoncesBroken,
    /// Version counter below its floor.
    VersionBelowFloor,
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(
    manifest: &ManifestState,
    table: &RouteTable,
    queue: &ExecutionQueue,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !check_pending_wellformed(manifest) {
        violations.push(InvariantViolation::PendingMalformed);
    }
    if !check_registry_consistency(table) {
        violations.push(InvariantViolation::RegistryInconsistent);
    }
    if !check_queue_nonces(queue) {
        violations.push(InvariantViolation::QueueNoncesBroken);
    }
    if !check_version_floor(manifest) {
        violations.push(InvariantViolation::VersionBelowFloor);
    }

    violations
}
