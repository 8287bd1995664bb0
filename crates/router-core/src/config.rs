//! Configuration for the routing engine.

use serde::{Deserialize, Serialize};

/// Router configuration: DoS ceilings and timelock bounds.
///
/// The ceilings are hard limits, never truncation points; exceeding any of
/// them fails the whole call or batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Maximum entries accepted in one apply batch (anti-DoS).
    pub max_batch_size: usize,
    /// Maximum deployed code size accepted for a routed module, in bytes.
    pub max_code_bytes: usize,
    /// Maximum return data accepted from a module per call, in bytes.
    pub max_return_bytes: usize,
    /// Activation delay applied at deployment (seconds).
    pub default_activation_delay: u64,
    /// Lower bound for every configurable delay (seconds).
    pub min_timelock_delay: u64,
    /// Upper bound for every configurable delay (seconds).
    pub max_timelock_delay: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 100,
            max_code_bytes: 24_576,
            max_return_bytes: 128 * 1024,
            default_activation_delay: 24 * 3_600,
            min_timelock_delay: 3_600,
            max_timelock_delay: 30 * 24 * 3_600,
        }
    }
}
