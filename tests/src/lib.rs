//! # Facet-Router Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared harness: wired router + manifest builder
//! │
//! └── integration/      # Cross-component scenarios
//!     ├── lifecycle.rs  # commit → apply → activate, epochs, freeze
//!     ├── routing.rs    # hot path, code swaps, DoS guards
//!     ├── governance.rs # rotation timelock, guardian paths
//!     ├── queue.rs      # deferred execution, replay resistance
//!     └── proofs.rs     # ordered-proof soundness
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p router-tests
//!
//! # By category
//! cargo test -p router-tests integration::lifecycle::
//! cargo test -p router-tests integration::routing::
//! ```

pub mod integration;
