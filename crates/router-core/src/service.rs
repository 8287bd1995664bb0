//! # Router Service
//!
//! The single long-lived entry point. Owns every piece of mutable state
//! (route table, manifest machine, governance, execution queue) and drives
//! it through the capability-checked entry points of [`RouterApi`].
//!
//! ## Entry-point policy
//!
//! | Entry point | Capability | Extra gate |
//! |-------------|------------|------------|
//! | `route` | none | pause flag |
//! | `commit/activate/set_activation_delay/freeze/set_min_delay/unpause` | Governance | freeze (except unpause) |
//! | `apply_routes` | Submitter | freeze, pending root |
//! | `remove_routes` | Emergency | freeze |
//! | `queue_rotate_governance` | Governance | single slot |
//! | `guardian_queue_rotate`, `guardian_pause` | Guardian | — |
//! | `execute_rotate_governance`, `execute_operation` | anyone | eta |
//! | `queue_operation` | Executor | eta floor |

use crate::algorithms::execution_queue::ExecutionQueue;
use crate::algorithms::governance::GovernanceState;
use crate::algorithms::manifest::ManifestState;
use crate::algorithms::routes::{RouteTable, RouteWrite};
use crate::config::RouterConfig;
use crate::domain::entities::{
    LifecyclePhase, QueuedOperation, Role, Route, RouteProof, RouteUpdate,
};
use crate::domain::services::{code_identity_of, leaf_of};
use crate::domain::value_objects::{Address, Bytes, Hash, Selector};
use crate::errors::RouterError;
use crate::events::{EventRecord, RouterEvent};
use crate::ports::inbound::RouterApi;
use crate::ports::outbound::{Clock, EventSink, ModuleHost, PermissionOracle, ProofVerifier};

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// The outbound collaborators the service is wired to.
#[derive(Clone)]
pub struct RouterPorts {
    /// Inclusion-proof oracle.
    pub proof_verifier: Arc<dyn ProofVerifier>,
    /// Deployed-module view and call forwarding.
    pub module_host: Arc<dyn ModuleHost>,
    /// Role and pause-flag oracle.
    pub permissions: Arc<dyn PermissionOracle>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Event destination.
    pub events: Arc<dyn EventSink>,
}

/// Counters for observability.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Calls forwarded through the hot path, including failed ones.
    pub calls_routed: u64,
    /// Hot-path calls that failed for any reason.
    pub calls_failed: u64,
    /// Apply batches accepted.
    pub batches_applied: u64,
    /// Individual routes written by apply batches.
    pub routes_written: u64,
    /// Operations committed to the execution queue.
    pub operations_queued: u64,
    /// Queue entries consumed by execution.
    pub operations_executed: u64,
}

/// The manifest-gated module router.
pub struct RouterService {
    config: RouterConfig,
    /// The router's own address; routing to it is forbidden.
    self_address: Address,
    manifest: ManifestState,
    governance: GovernanceState,
    queue: ExecutionQueue,
    routes: RouteTable,
    ports: RouterPorts,
    stats: ServiceStats,
}

impl RouterService {
    /// Deploy the router: epoch 0, version 1, empty table.
    ///
    /// Grants the Governance and Guardian roles to the given identities so
    /// the oracle starts consistent with the governance state.
    ///
    /// # Errors
    ///
    /// `ZeroAddress` for a zero router, governance, or guardian identity.
    pub fn new(
        config: RouterConfig,
        self_address: Address,
        governance: Address,
        guardian: Address,
        ports: RouterPorts,
    ) -> Result<Self, RouterError> {
        if self_address.is_zero() {
            return Err(RouterError::ZeroAddress { context: "router" });
        }

        let governance_state =
            GovernanceState::new(governance, guardian, config.min_timelock_delay)?;
        ports.permissions.grant_role(Role::Governance, governance);
        ports.permissions.grant_role(Role::Guardian, guardian);

        Ok(Self {
            manifest: ManifestState::new(config.default_activation_delay),
            governance: governance_state,
            queue: ExecutionQueue::new(),
            routes: RouteTable::new(),
            config,
            self_address,
            ports,
            stats: ServiceStats::default(),
        })
    }

    /// Current manifest state (read-only).
    #[must_use]
    pub fn manifest(&self) -> &ManifestState {
        &self.manifest
    }

    /// Current governance state (read-only).
    #[must_use]
    pub fn governance(&self) -> &GovernanceState {
        &self.governance
    }

    /// Current route table (read-only).
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Service counters.
    #[must_use]
    pub fn stats(&self) -> &ServiceStats {
        &self.stats
    }

    fn now(&self) -> u64 {
        self.ports.clock.now_secs()
    }

    fn require_role(&self, role: Role, caller: Address) -> Result<(), RouterError> {
        if self.ports.permissions.has_role(role, caller) {
            Ok(())
        } else {
            warn!(?role, %caller, "capability check failed");
            Err(RouterError::Unauthorized { role, caller })
        }
    }

    fn emit(&self, correlation_id: Uuid, event: RouterEvent) {
        self.ports.events.emit(EventRecord {
            correlation_id,
            event,
        });
    }

    /// Validate one apply-batch entry: target checks, code presence and
    /// size, proof verification, and the code-identity fail-fast. The code
    /// identity is computed from the bytes read here, so it covers exactly
    /// what was checked.
    fn validate_entry(
        &self,
        pending_root: Hash,
        update: &RouteUpdate,
        proof: &RouteProof,
    ) -> Result<(), RouterError> {
        if update.module.is_zero() {
            return Err(RouterError::ZeroAddress {
                context: "route target",
            });
        }
        if update.module == self.self_address {
            return Err(RouterError::SelfRouting);
        }

        let code = self
            .ports
            .module_host
            .code(update.module)
            .ok_or(RouterError::NoCode {
                module: update.module,
            })?;
        if code.is_empty() {
            return Err(RouterError::NoCode {
                module: update.module,
            });
        }
        if code.len() > self.config.max_code_bytes {
            return Err(RouterError::CodeTooLarge {
                size: code.len(),
                max: self.config.max_code_bytes,
            });
        }

        let leaf = leaf_of(update.selector, update.module, update.code_identity);
        if !self
            .ports
            .proof_verifier
            .verify(&proof.siblings, &proof.position_bits, pending_root, leaf)
        {
            return Err(RouterError::InvalidProof {
                selector: update.selector,
            });
        }

        // Fail fast on proofs computed against stale code.
        let actual = code_identity_of(&code);
        if actual != update.code_identity {
            return Err(RouterError::CodeIdentityMismatch {
                module: update.module,
                expected: update.code_identity,
                actual,
            });
        }

        Ok(())
    }
}

impl RouterApi for RouterService {
    // =========================================================================
    // HOT PATH
    // =========================================================================

    #[instrument(skip(self, calldata), fields(caller = %caller, len = calldata.len()))]
    fn route(&mut self, caller: Address, calldata: &[u8]) -> Result<Bytes, RouterError> {
        self.stats.calls_routed += 1;

        let outcome = self.route_inner(calldata);
        if outcome.is_err() {
            self.stats.calls_failed += 1;
        }
        outcome
    }

    fn resolve(&self, selector: Selector) -> Option<Route> {
        self.routes.resolve(selector)
    }

    // =========================================================================
    // MANIFEST LIFECYCLE
    // =========================================================================

    #[instrument(skip(self), fields(caller = %caller, root = %root, epoch))]
    fn commit_manifest(
        &mut self,
        caller: Address,
        root: Hash,
        epoch: u64,
    ) -> Result<(), RouterError> {
        self.require_role(Role::Governance, caller)?;

        let now = self.now();
        self.manifest.commit(root, epoch, now)?;

        info!(%root, epoch, "manifest committed");
        self.emit(
            Uuid::new_v4(),
            RouterEvent::ManifestCommitted {
                root,
                epoch,
                committed_at: now,
            },
        );
        Ok(())
    }

    #[instrument(skip(self, updates, proofs), fields(caller = %caller, batch = updates.len()))]
    fn apply_routes(
        &mut self,
        caller: Address,
        updates: &[RouteUpdate],
        proofs: &[RouteProof],
    ) -> Result<(), RouterError> {
        self.require_role(Role::Submitter, caller)?;

        let pending_root = self.manifest.pending_root_for_apply()?;

        if updates.is_empty() {
            return Err(RouterError::EmptyBatch);
        }
        if updates.len() > self.config.max_batch_size {
            return Err(RouterError::BatchTooLarge {
                size: updates.len(),
                max: self.config.max_batch_size,
            });
        }
        if proofs.len() != updates.len() {
            return Err(RouterError::ProofCountMismatch {
                updates: updates.len(),
                proofs: proofs.len(),
            });
        }

        let mut seen: HashSet<Selector> = HashSet::with_capacity(updates.len());
        for update in updates {
            if !seen.insert(update.selector) {
                return Err(RouterError::DuplicateSelector {
                    selector: update.selector,
                });
            }
        }

        // Validate everything before writing anything: an invalid batch is
        // rejected whole, with no partial application.
        for (update, proof) in updates.iter().zip(proofs) {
            self.validate_entry(pending_root, update, proof)?;
        }

        let correlation_id = Uuid::new_v4();
        for update in updates {
            let write = self.routes.insert(update.selector, update.route());
            self.stats.routes_written += 1;

            let event = match write {
                RouteWrite::Added => RouterEvent::RouteAdded {
                    selector: update.selector,
                    module: update.module,
                    code_identity: update.code_identity,
                },
                RouteWrite::Updated { previous } => RouterEvent::RouteUpdated {
                    selector: update.selector,
                    old_module: previous.module,
                    module: update.module,
                    code_identity: update.code_identity,
                },
            };
            self.emit(correlation_id, event);
        }

        self.manifest.mark_applied();
        self.stats.batches_applied += 1;

        info!(
            batch = updates.len(),
            version = self.manifest.manifest_version,
            "route batch applied"
        );
        self.emit(
            correlation_id,
            RouterEvent::RoutesApplied {
                root: pending_root,
                count: updates.len(),
                manifest_version: self.manifest.manifest_version,
            },
        );
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn activate_manifest(&mut self, caller: Address) -> Result<(), RouterError> {
        self.require_role(Role::Governance, caller)?;

        self.manifest.activate(self.now())?;

        info!(
            root = %self.manifest.active_root,
            epoch = self.manifest.active_epoch,
            "manifest activated"
        );
        self.emit(
            Uuid::new_v4(),
            RouterEvent::ManifestActivated {
                root: self.manifest.active_root,
                epoch: self.manifest.active_epoch,
                manifest_version: self.manifest.manifest_version,
            },
        );
        Ok(())
    }

    #[instrument(skip(self, selectors), fields(caller = %caller, count = selectors.len()))]
    fn remove_routes(
        &mut self,
        caller: Address,
        selectors: &[Selector],
    ) -> Result<(), RouterError> {
        self.require_role(Role::Emergency, caller)?;

        if self.manifest.is_frozen() {
            return Err(RouterError::Frozen);
        }

        let correlation_id = Uuid::new_v4();
        for selector in selectors {
            if let Some(removed) = self.routes.remove(*selector) {
                warn!(selector = %selector, module = %removed.module, "route removed out of band");
                self.emit(
                    correlation_id,
                    RouterEvent::RouteRemoved {
                        selector: *selector,
                        module: removed.module,
                    },
                );
            }
        }
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller, new_delay))]
    fn set_activation_delay(
        &mut self,
        caller: Address,
        new_delay: u64,
    ) -> Result<(), RouterError> {
        self.require_role(Role::Governance, caller)?;

        let old_delay = self.manifest.activation_delay;
        self.manifest.set_activation_delay(
            new_delay,
            self.config.min_timelock_delay,
            self.config.max_timelock_delay,
        )?;

        self.emit(
            Uuid::new_v4(),
            RouterEvent::ActivationDelayChanged {
                old_delay,
                new_delay,
            },
        );
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn freeze(&mut self, caller: Address) -> Result<(), RouterError> {
        self.require_role(Role::Governance, caller)?;

        self.manifest.freeze()?;

        info!("configuration permanently frozen");
        self.emit(Uuid::new_v4(), RouterEvent::ConfigFrozen { caller });
        Ok(())
    }

    // =========================================================================
    // GOVERNANCE
    // =========================================================================

    #[instrument(skip(self), fields(caller = %caller, new_governance = %new_governance))]
    fn queue_rotate_governance(
        &mut self,
        caller: Address,
        new_governance: Address,
    ) -> Result<u64, RouterError> {
        self.require_role(Role::Governance, caller)?;

        let eta = self.governance.queue_rotation(new_governance, self.now())?;

        self.emit(
            Uuid::new_v4(),
            RouterEvent::GovernanceRotationQueued {
                new_governance,
                eta,
                queued_by_guardian: false,
            },
        );
        Ok(eta)
    }

    #[instrument(skip(self), fields(caller = %caller, new_governance = %new_governance))]
    fn guardian_queue_rotate(
        &mut self,
        caller: Address,
        new_governance: Address,
    ) -> Result<u64, RouterError> {
        self.require_role(Role::Guardian, caller)?;

        let eta = self
            .governance
            .queue_guardian_rotation(new_governance, self.now())?;

        warn!(new_governance = %new_governance, eta, "guardian queued emergency rotation");
        self.emit(
            Uuid::new_v4(),
            RouterEvent::GovernanceRotationQueued {
                new_governance,
                eta,
                queued_by_guardian: true,
            },
        );
        Ok(eta)
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn execute_rotate_governance(&mut self, caller: Address) -> Result<(), RouterError> {
        // Callable by anyone: readiness is enforced by the eta, not identity.
        let _ = caller;
        let (old, new) = self.governance.execute_rotation(self.now())?;

        // Atomic capability move: the old identity loses governance scope in
        // the same transition the new one gains it.
        self.ports.permissions.revoke_role(Role::Governance, old);
        self.ports.permissions.grant_role(Role::Governance, new);

        let correlation_id = Uuid::new_v4();
        info!(old = %old, new = %new, "governance rotated");
        self.emit(
            correlation_id,
            RouterEvent::RoleRevoked {
                role: Role::Governance,
                from: old,
            },
        );
        self.emit(
            correlation_id,
            RouterEvent::RoleGranted {
                role: Role::Governance,
                to: new,
            },
        );
        self.emit(
            correlation_id,
            RouterEvent::GovernanceRotationExecuted {
                old_governance: old,
                new_governance: new,
            },
        );
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn guardian_pause(&mut self, caller: Address) -> Result<(), RouterError> {
        self.require_role(Role::Guardian, caller)?;

        self.ports.permissions.set_paused(true);
        warn!(guardian = %caller, "router paused by guardian");
        self.emit(Uuid::new_v4(), RouterEvent::GuardianPaused { guardian: caller });
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn unpause(&mut self, caller: Address) -> Result<(), RouterError> {
        self.require_role(Role::Governance, caller)?;

        // Deliberately not gated on freeze: freeze locks configuration, not
        // the emergency stop.
        self.ports.permissions.set_paused(false);
        info!("router unpaused");
        self.emit(Uuid::new_v4(), RouterEvent::Unpaused { caller });
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller, new_delay))]
    fn set_min_delay(&mut self, caller: Address, new_delay: u64) -> Result<(), RouterError> {
        self.require_role(Role::Governance, caller)?;

        if self.manifest.is_frozen() {
            return Err(RouterError::Frozen);
        }

        let old_delay = self.governance.min_delay;
        self.governance.set_min_delay(
            new_delay,
            self.config.min_timelock_delay,
            self.config.max_timelock_delay,
        )?;

        self.emit(
            Uuid::new_v4(),
            RouterEvent::MinDelayChanged {
                old_delay,
                new_delay,
            },
        );
        Ok(())
    }

    // =========================================================================
    // EXECUTION QUEUE
    // =========================================================================

    #[instrument(skip(self, operation_data), fields(caller = %caller, eta))]
    fn queue_operation(
        &mut self,
        caller: Address,
        operation_data: &[u8],
        eta: u64,
    ) -> Result<u64, RouterError> {
        self.require_role(Role::Executor, caller)?;

        let entry =
            self.queue
                .enqueue(operation_data, eta, self.now(), self.governance.min_delay)?;
        self.stats.operations_queued += 1;

        debug!(nonce = entry.nonce, eta, "operation queued");
        self.emit(
            Uuid::new_v4(),
            RouterEvent::OperationQueued {
                nonce: entry.nonce,
                operation_hash: entry.operation_hash,
                eta: entry.eta,
            },
        );
        Ok(entry.nonce)
    }

    #[instrument(skip(self, operation_data), fields(caller = %caller, nonce, tip))]
    fn execute_operation(
        &mut self,
        caller: Address,
        nonce: u64,
        operation_data: &[u8],
        tip: u64,
    ) -> Result<Bytes, RouterError> {
        // Callable by anyone; the queue enforces commitment and eta. The
        // entry is consumed here, before execution, so the outcome of the
        // run cannot resurrect it.
        self.queue.take(nonce, operation_data, self.now())?;
        self.stats.operations_executed += 1;

        let outcome = self.route(self.self_address, operation_data);

        self.emit(
            Uuid::new_v4(),
            RouterEvent::OperationExecuted {
                nonce,
                success: outcome.is_ok(),
                tip_refunded: tip,
                executor: caller,
            },
        );
        outcome
    }

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    fn modules(&self) -> Vec<Address> {
        self.routes.modules()
    }

    fn selectors_of(&self, module: Address) -> Vec<Selector> {
        self.routes.selectors_of(module)
    }

    fn module_of(&self, selector: Selector) -> Option<Address> {
        self.routes.module_of(selector)
    }

    fn snapshot(&self) -> Vec<(Address, Vec<Selector>)> {
        self.routes.snapshot()
    }

    fn lifecycle_phase(&self) -> LifecyclePhase {
        self.manifest.phase(self.now())
    }

    fn queued_operation(&self, nonce: u64) -> Option<QueuedOperation> {
        self.queue.get(nonce)
    }
}

impl RouterService {
    fn route_inner(&mut self, calldata: &[u8]) -> Result<Bytes, RouterError> {
        if self.ports.permissions.is_paused() {
            return Err(RouterError::Paused);
        }

        let selector = Selector::from_calldata(calldata).ok_or(RouterError::CalldataTooShort {
            len: calldata.len(),
        })?;

        let route = self
            .routes
            .resolve(selector)
            .ok_or(RouterError::NoRoute { selector })?;

        // Code identity is recomputed on every call; a module swapped after
        // registration is caught here, never executed.
        let code = self
            .ports
            .module_host
            .code(route.module)
            .ok_or(RouterError::NoCode {
                module: route.module,
            })?;
        let actual = code_identity_of(&code);
        if actual != route.code_identity {
            warn!(
                selector = %selector,
                module = %route.module,
                "code identity drift detected at call time"
            );
            return Err(RouterError::CodeIdentityMismatch {
                module: route.module,
                expected: route.code_identity,
                actual,
            });
        }

        let outcome = match self.ports.module_host.call(route.module, calldata) {
            Ok(output) if output.len() > self.config.max_return_bytes => {
                Err(RouterError::ReturnDataTooLarge {
                    size: output.len(),
                    max: self.config.max_return_bytes,
                })
            }
            Ok(output) => Ok(output),
            Err(failure) => Err(RouterError::ModuleFailed {
                payload: failure.payload,
            }),
        };

        // Emitted after the return-cap check, so the event's outcome always
        // matches what the original caller receives.
        self.emit(
            Uuid::new_v4(),
            RouterEvent::CallRouted {
                selector,
                module: route.module,
                success: outcome.is_ok(),
            },
        );
        if outcome.is_ok() {
            debug!(selector = %selector, module = %route.module, "call routed");
        }
        outcome
    }
}
