//! # Integration Scenarios
//!
//! Cross-component tests driving the full router through its public API,
//! with real ordered-proof manifests built off-line by the fixtures.

pub mod governance;
pub mod proofs;
pub mod queue;
pub mod routing;
