//! # Router-Core - Manifest-Gated Module Routing Engine
//!
//! ## Purpose
//!
//! A single long-lived entry point that forwards each incoming call to one
//! of many independently deployed code modules, based on a route table whose
//! contents can only change through a cryptographically verified,
//! governance-controlled, time-delayed upgrade procedure.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Epoch monotonicity: commits only target `active_epoch + 1` | `algorithms/manifest.rs` - `ManifestState::commit()` |
//! | INVARIANT-2 | Freeze is one-way | `algorithms/manifest.rs` - `ManifestState::freeze()` + `ensure_unlocked()` |
//! | INVARIANT-3 | Registry consistency: module listed iff it owns a selector | `algorithms/routes.rs` - `RouteTable::insert()/remove()` |
//! | INVARIANT-4 | Queue nonces strictly increase, never reused | `algorithms/execution_queue.rs` - `ExecutionQueue::enqueue()` |
//! | INVARIANT-5 | Code identity recomputed at call time | `service.rs` - `RouterService::route_inner()` |
//!
//! ## Security Limits (hard rejections, never truncation)
//!
//! | Limit | Default | Purpose |
//! |-------|---------|---------|
//! | `max_batch_size` | 100 entries | Bound apply-batch work |
//! | `max_code_bytes` | 24 KB | Limit routed module size |
//! | `max_return_bytes` | 128 KB | Defuse return-data bombs |
//!
//! ## Lifecycle
//!
//! Governance commits a manifest root → a submitter proves and applies
//! routes against it → after the activation delay, governance promotes the
//! root to active. The hot path serves only active state; every forwarded
//! call re-verifies the target module's code identity.
//!
//! ## Usage Example
//!
//! ```ignore
//! use router_core::prelude::*;
//!
//! let mut router = RouterService::new(config, router_addr, gov, guardian, ports)?;
//! router.commit_manifest(gov, root, 1)?;
//! router.apply_routes(submitter, &updates, &proofs)?;
//! // ...activation delay elapses...
//! router.activate_manifest(gov)?;
//! let output = router.route(caller, &calldata)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        ConfigLock, LifecyclePhase, PendingRotation, QueuedOperation, Role, Route, RouteProof,
        RouteUpdate,
    };

    // Value objects
    pub use crate::domain::value_objects::{Address, Bytes, Hash, Selector};

    // Domain services
    pub use crate::domain::services::{code_identity_of, keccak256, leaf_of, operation_hash};

    // State machines
    pub use crate::algorithms::{ExecutionQueue, GovernanceState, ManifestState, RouteTable};

    // Configuration and errors
    pub use crate::config::RouterConfig;
    pub use crate::errors::RouterError;

    // Events
    pub use crate::events::{EventRecord, RouterEvent};

    // Ports
    pub use crate::ports::inbound::RouterApi;
    pub use crate::ports::outbound::{
        Clock, EventSink, ModuleFailure, ModuleHost, PermissionOracle, ProofVerifier,
    };

    // Service
    pub use crate::service::{RouterPorts, RouterService, ServiceStats};
}
