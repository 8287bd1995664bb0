//! # Adapters
//!
//! In-process implementations of the outbound ports: an in-memory module
//! host, a role/pause oracle, clocks, event sinks, and the ordered-proof
//! verifier adapter. Production hosts replace these behind the same traits.

pub mod clock;
pub mod event_sink;
pub mod module_host;
pub mod permission;
pub mod proof_verifier;

pub use clock::{ManualClock, SystemClock};
pub use event_sink::{RecordingEventSink, TracingEventSink};
pub use module_host::InMemoryModuleHost;
pub use permission::InMemoryPermissionOracle;
pub use proof_verifier::OrderedProofVerifier;
