//! # Driving Ports (API - Inbound)
//!
//! The surface callers drive: the hot routing path, the manifest lifecycle,
//! governance, the execution queue, and read-only introspection.

use crate::domain::entities::{
    LifecyclePhase, QueuedOperation, Route, RouteProof, RouteUpdate,
};
use crate::domain::value_objects::{Address, Bytes, Hash, Selector};
use crate::errors::RouterError;

/// The routing engine's full API.
///
/// `caller` on every mutating method is the identity the permission oracle
/// checks; the engine never infers identity from anything else.
pub trait RouterApi {
    // =========================================================================
    // HOT PATH
    // =========================================================================

    /// Forward a call to the module routed for the calldata's selector.
    ///
    /// # Errors
    ///
    /// `Paused`, `CalldataTooShort`, `NoRoute`, `CodeIdentityMismatch`,
    /// `ReturnDataTooLarge`, or the module's own failure (`ModuleFailed`).
    fn route(&mut self, caller: Address, calldata: &[u8]) -> Result<Bytes, RouterError>;

    /// Look up the route for a selector.
    fn resolve(&self, selector: Selector) -> Option<Route>;

    // =========================================================================
    // MANIFEST LIFECYCLE
    // =========================================================================

    /// Commit a manifest root for the next epoch (Governance).
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `Frozen`, `ZeroRoot`, `EpochMismatch`.
    fn commit_manifest(
        &mut self,
        caller: Address,
        root: Hash,
        epoch: u64,
    ) -> Result<(), RouterError>;

    /// Prove and write a batch of routes against the pending root (Submitter).
    ///
    /// The whole batch fails atomically on any invalid entry.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `Frozen`, `NoPendingRoot`, `EmptyBatch`,
    /// `BatchTooLarge`, `ProofCountMismatch`, `DuplicateSelector`,
    /// `ZeroAddress`, `SelfRouting`, `NoCode`, `CodeTooLarge`,
    /// `InvalidProof`, `CodeIdentityMismatch`.
    fn apply_routes(
        &mut self,
        caller: Address,
        updates: &[RouteUpdate],
        proofs: &[RouteProof],
    ) -> Result<(), RouterError>;

    /// Promote the pending root once the delay has elapsed (Governance).
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `Frozen`, `NoPendingRoot`, `ActivationNotReady`.
    fn activate_manifest(&mut self, caller: Address) -> Result<(), RouterError>;

    /// Delete routes immediately, out of band (Emergency).
    ///
    /// # Errors
    ///
    /// `Unauthorized` or `Frozen`.
    fn remove_routes(&mut self, caller: Address, selectors: &[Selector])
        -> Result<(), RouterError>;

    /// Change the activation delay (Governance).
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `Frozen`, `DelayOutOfBounds`.
    fn set_activation_delay(&mut self, caller: Address, new_delay: u64)
        -> Result<(), RouterError>;

    /// Permanently lock configuration (Governance).
    ///
    /// # Errors
    ///
    /// `Unauthorized` or `AlreadyFrozen`.
    fn freeze(&mut self, caller: Address) -> Result<(), RouterError>;

    // =========================================================================
    // GOVERNANCE
    // =========================================================================

    /// Queue a governance rotation (Governance).
    ///
    /// Returns the eta. See `execute_rotate_governance`.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `ZeroAddress`, `RotationAlreadyPending`.
    fn queue_rotate_governance(
        &mut self,
        caller: Address,
        new_governance: Address,
    ) -> Result<u64, RouterError>;

    /// Queue an emergency rotation (Guardian); same timelock applies.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `ZeroAddress`, `RotationAlreadyPending`.
    fn guardian_queue_rotate(
        &mut self,
        caller: Address,
        new_governance: Address,
    ) -> Result<u64, RouterError>;

    /// Execute the pending rotation; callable by anyone once ready.
    ///
    /// # Errors
    ///
    /// `NoPendingRotation` or `RotationNotReady`.
    fn execute_rotate_governance(&mut self, caller: Address) -> Result<(), RouterError>;

    /// Immediate halt (Guardian).
    ///
    /// # Errors
    ///
    /// `Unauthorized`.
    fn guardian_pause(&mut self, caller: Address) -> Result<(), RouterError>;

    /// Resume after a pause (Governance).
    ///
    /// # Errors
    ///
    /// `Unauthorized`.
    fn unpause(&mut self, caller: Address) -> Result<(), RouterError>;

    /// Change the timelock floor (Governance).
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `Frozen`, `DelayOutOfBounds`.
    fn set_min_delay(&mut self, caller: Address, new_delay: u64) -> Result<(), RouterError>;

    // =========================================================================
    // EXECUTION QUEUE
    // =========================================================================

    /// Commit an operation for deferred execution (Executor).
    ///
    /// Returns the assigned nonce.
    ///
    /// # Errors
    ///
    /// `Unauthorized` or `EtaTooSoon`.
    fn queue_operation(
        &mut self,
        caller: Address,
        operation_data: &[u8],
        eta: u64,
    ) -> Result<u64, RouterError>;

    /// Run a queued operation; callable by anyone once the eta passes.
    ///
    /// The entry is consumed exactly once regardless of the run's outcome;
    /// the operation's own result is returned.
    ///
    /// # Errors
    ///
    /// `UnknownOperation`, `OperationDataMismatch`, `OperationNotReady`, or
    /// the routed operation's failure.
    fn execute_operation(
        &mut self,
        caller: Address,
        nonce: u64,
        operation_data: &[u8],
        tip: u64,
    ) -> Result<Bytes, RouterError>;

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    /// Modules with at least one registered selector.
    fn modules(&self) -> Vec<Address>;

    /// Selectors routed to a module.
    fn selectors_of(&self, module: Address) -> Vec<Selector>;

    /// The module a selector forwards to.
    fn module_of(&self, selector: Selector) -> Option<Address>;

    /// Full `(module, selectors)` enumeration.
    fn snapshot(&self) -> Vec<(Address, Vec<Selector>)>;

    /// Where the manifest state machine currently sits.
    fn lifecycle_phase(&self) -> LifecyclePhase;

    /// Pending queue entry for a nonce, if any.
    fn queued_operation(&self, nonce: u64) -> Option<QueuedOperation>;
}
