//! # Error Types
//!
//! All errors of the routing engine, grouped by taxonomy:
//!
//! | Class | Variants | Policy |
//! |-------|----------|--------|
//! | Configuration | `ZeroAddress`, `ZeroRoot`, `DelayOutOfBounds`, `Frozen` | reported immediately, never retried |
//! | Proof/integrity | `InvalidProof`, `CodeIdentityMismatch`, `DuplicateSelector` | whole batch fails, no partial application |
//! | Lifecycle ordering | `EpochMismatch`, `NoPendingRoot`, `ActivationNotReady`, `RotationNotReady`, ... | report expected vs actual so the caller can retry correctly |
//! | Capacity / DoS | `EmptyBatch`, `BatchTooLarge`, `ReturnDataTooLarge`, `CodeTooLarge`, `NoCode`, `SelfRouting` | hard reject against fixed ceilings, never truncate |
//! | Routing | `NoRoute`, `Paused`, `ModuleFailed` | surfaced to the original caller verbatim |
//! | Authorization | `Unauthorized` | capability check failed at the entry point |
//! | Queue | `EtaTooSoon`, `UnknownOperation`, `OperationDataMismatch`, `OperationNotReady` | terminal; replay and substitution are impossible |
//!
//! Every failure is a terminal, explicit signal; nothing here retries
//! internally.

use crate::domain::entities::Role;
use crate::domain::value_objects::{Address, Bytes, Hash, Selector};
use thiserror::Error;

/// All errors that can occur in the routing engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    // =========================================================================
    // CONFIGURATION
    // =========================================================================
    /// A zero address where a real identity is required.
    #[error("zero address not allowed for {context}")]
    ZeroAddress {
        /// Which argument was zero.
        context: &'static str,
    },

    /// Committed root must be non-zero.
    #[error("manifest root must be non-zero")]
    ZeroRoot,

    /// Requested delay outside the configured bounds.
    #[error("delay out of bounds: {requested}s not in [{min}s, {max}s]")]
    DelayOutOfBounds {
        /// Requested delay in seconds.
        requested: u64,
        /// Lower bound.
        min: u64,
        /// Upper bound.
        max: u64,
    },

    /// Configuration is permanently frozen.
    #[error("configuration is frozen")]
    Frozen,

    /// `freeze()` called when already frozen.
    #[error("already frozen")]
    AlreadyFrozen,

    // =========================================================================
    // PROOF / INTEGRITY
    // =========================================================================
    /// Ordered inclusion proof did not verify against the pending root.
    #[error("invalid inclusion proof for selector {selector}")]
    InvalidProof {
        /// The batch entry that failed.
        selector: Selector,
    },

    /// Module's current code hash differs from the registered identity.
    #[error("code identity mismatch for module {module}: expected {expected}, got {actual}")]
    CodeIdentityMismatch {
        /// Module whose code drifted.
        module: Address,
        /// Registered identity.
        expected: Hash,
        /// Identity recomputed at call time.
        actual: Hash,
    },

    /// The same selector appears twice in one apply batch.
    #[error("duplicate selector in batch: {selector}")]
    DuplicateSelector {
        /// The repeated route key.
        selector: Selector,
    },

    /// An apply batch carried a different number of proofs than entries.
    #[error("proof count mismatch: {updates} entries, {proofs} proofs")]
    ProofCountMismatch {
        /// Entries submitted.
        updates: usize,
        /// Proofs submitted.
        proofs: usize,
    },

    // =========================================================================
    // LIFECYCLE ORDERING
    // =========================================================================
    /// Commit targeted an epoch other than `active_epoch + 1`.
    #[error("epoch mismatch: expected {expected}, got {actual}")]
    EpochMismatch {
        /// The only acceptable epoch.
        expected: u64,
        /// The epoch the caller supplied.
        actual: u64,
    },

    /// Apply/activate called with no committed root outstanding.
    #[error("no pending manifest root")]
    NoPendingRoot,

    /// Activation delay has not elapsed.
    #[error("activation not ready: earliest {earliest}, now {now}")]
    ActivationNotReady {
        /// Earliest allowed activation time (unix seconds).
        earliest: u64,
        /// Current time (unix seconds).
        now: u64,
    },

    /// Governance rotation eta has not elapsed.
    #[error("rotation not ready: eta {eta}, now {now}")]
    RotationNotReady {
        /// Earliest allowed execution time.
        eta: u64,
        /// Current time.
        now: u64,
    },

    /// A rotation is already queued in the single pending slot.
    #[error("a governance rotation is already pending")]
    RotationAlreadyPending,

    /// Execute-rotation called with nothing queued.
    #[error("no governance rotation pending")]
    NoPendingRotation,

    // =========================================================================
    // CAPACITY / DOS GUARDS
    // =========================================================================
    /// Apply batch carried no entries; a version bump must always
    /// correspond to written routes.
    #[error("empty apply batch")]
    EmptyBatch,

    /// Apply batch exceeds the configured ceiling.
    #[error("batch too large: {size} > {max}")]
    BatchTooLarge {
        /// Entries submitted.
        size: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// Module returned more data than the router accepts.
    #[error("return data too large: {size} > {max} bytes")]
    ReturnDataTooLarge {
        /// Bytes returned.
        size: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// Module's deployed code exceeds the size ceiling.
    #[error("module code too large: {size} > {max} bytes")]
    CodeTooLarge {
        /// Deployed code size.
        size: usize,
        /// Configured ceiling.
        max: usize,
    },

    /// No code deployed at the target module address.
    #[error("no code deployed at module {module}")]
    NoCode {
        /// The empty address.
        module: Address,
    },

    /// Route target equals the router itself; forbidden to prevent recursion.
    #[error("self-routing forbidden")]
    SelfRouting,

    // =========================================================================
    // ROUTING
    // =========================================================================
    /// No route registered for the calldata selector.
    #[error("no route for selector {selector}")]
    NoRoute {
        /// The unmatched route key.
        selector: Selector,
    },

    /// Calldata shorter than one selector; it can never match a route.
    #[error("calldata too short to carry a selector: {len} bytes")]
    CalldataTooShort {
        /// Supplied calldata length.
        len: usize,
    },

    /// The router is paused.
    #[error("router is paused")]
    Paused,

    /// The target module executed and failed; its payload is propagated
    /// verbatim to the original caller.
    #[error("module call failed ({} byte payload)", payload.len())]
    ModuleFailed {
        /// The module's error payload, untouched.
        payload: Bytes,
    },

    // =========================================================================
    // AUTHORIZATION
    // =========================================================================
    /// Caller lacks the required role.
    #[error("unauthorized: {caller} lacks role {role:?}")]
    Unauthorized {
        /// Required capability.
        role: Role,
        /// The rejected caller.
        caller: Address,
    },

    // =========================================================================
    // EXECUTION QUEUE
    // =========================================================================
    /// Queued eta earlier than the timelock floor.
    #[error("eta too soon: {eta} < earliest {earliest}")]
    EtaTooSoon {
        /// Requested eta.
        eta: u64,
        /// `now + min_delay` floor.
        earliest: u64,
    },

    /// No queue entry for the nonce (never queued, or already consumed).
    #[error("unknown operation nonce {nonce}")]
    UnknownOperation {
        /// The missing nonce.
        nonce: u64,
    },

    /// Supplied operation data does not hash to the stored commitment.
    #[error("operation data mismatch for nonce {nonce}")]
    OperationDataMismatch {
        /// The entry whose commitment failed.
        nonce: u64,
    },

    /// Operation eta has not elapsed.
    #[error("operation not ready: eta {eta}, now {now}")]
    OperationNotReady {
        /// Earliest allowed execution time.
        eta: u64,
        /// Current time.
        now: u64,
    },
}
