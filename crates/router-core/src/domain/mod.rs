//! # Domain Module
//!
//! Core domain types for the routing engine.

pub mod entities;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
