//! # Execution Queue
//!
//! Nonce-ordered, hash-committed deferred operations. What will run is fixed
//! at queue time (by commitment hash) and when it may run is fixed by the
//! eta, so pending privileged calls carry no reordering incentive.
//!
//! Entries are consumed exactly once, on successful *or* failed execution,
//! and nonces are never reused, so replay is impossible by construction.

use crate::domain::entities::QueuedOperation;
use crate::domain::services::operation_hash;
use crate::errors::RouterError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The deferred-operation queue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionQueue {
    next_nonce: u64,
    entries: BTreeMap<u64, QueuedOperation>,
}

impl ExecutionQueue {
    /// Empty queue; the first nonce assigned is 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit an operation for deferred execution.
    ///
    /// The eta must respect the timelock floor (`now + min_delay`).
    ///
    /// # Errors
    ///
    /// `EtaTooSoon { eta, earliest }`.
    pub fn enqueue(
        &mut self,
        operation_data: &[u8],
        eta: u64,
        now: u64,
        min_delay: u64,
    ) -> Result<QueuedOperation, RouterError> {
        let earliest = now + min_delay;
        if eta < earliest {
            return Err(RouterError::EtaTooSoon { eta, earliest });
        }

        let nonce = self.next_nonce;
        self.next_nonce += 1;

        let entry = QueuedOperation {
            nonce,
            operation_hash: operation_hash(operation_data),
            eta,
        };
        self.entries.insert(nonce, entry);
        Ok(entry)
    }

    /// Consume the entry for `nonce`, checking commitment and readiness.
    ///
    /// The entry is removed only on success here; the caller then runs the
    /// operation, and the removal stands regardless of the run's outcome.
    /// The data check precedes the time check so a substituted payload is
    /// reported as `OperationDataMismatch` even before the eta passes.
    ///
    /// # Errors
    ///
    /// `UnknownOperation`, `OperationDataMismatch`, or `OperationNotReady`.
    pub fn take(
        &mut self,
        nonce: u64,
        operation_data: &[u8],
        now: u64,
    ) -> Result<QueuedOperation, RouterError> {
        let entry = *self
            .entries
            .get(&nonce)
            .ok_or(RouterError::UnknownOperation { nonce })?;

        if operation_hash(operation_data) != entry.operation_hash {
            return Err(RouterError::OperationDataMismatch { nonce });
        }

        if now < entry.eta {
            return Err(RouterError::OperationNotReady {
                eta: entry.eta,
                now,
            });
        }

        self.entries.remove(&nonce);
        Ok(entry)
    }

    /// Pending entry for a nonce, if any.
    #[must_use]
    pub fn get(&self, nonce: u64) -> Option<QueuedOperation> {
        self.entries.get(&nonce).copied()
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pending entries in nonce order.
    pub fn iter(&self) -> impl Iterator<Item = QueuedOperation> + '_ {
        self.entries.values().copied()
    }
}
