//! # Algorithms
//!
//! The routing engine's state machines: manifest lifecycle, route table with
//! its derived registry, timelocked governance, and the deferred-execution
//! queue. All of them are pure over an explicit `now` parameter.

pub mod execution_queue;
pub mod governance;
pub mod manifest;
pub mod routes;

pub use execution_queue::ExecutionQueue;
pub use governance::GovernanceState;
pub use manifest::ManifestState;
pub use routes::{RouteTable, RouteWrite};
