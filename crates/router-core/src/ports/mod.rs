//! # Ports
//!
//! Hexagonal architecture interfaces:
//! - **Inbound (API)**: the administrative and routing surface callers drive.
//! - **Outbound (SPI)**: the collaborators the engine queries — proof
//!   verification, module hosting, permissions, time, event emission.

pub mod inbound;
pub mod outbound;

pub use inbound::RouterApi;
pub use outbound::{Clock, EventSink, ModuleFailure, ModuleHost, PermissionOracle, ProofVerifier};
