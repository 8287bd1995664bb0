//! In-memory role/pause oracle.

use crate::domain::entities::Role;
use crate::domain::value_objects::Address;
use crate::ports::outbound::PermissionOracle;
use std::collections::HashSet;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, RwLock,
};

/// In-memory [`PermissionOracle`] implementation: a role set plus the
/// global pause flag.
#[derive(Clone, Default)]
pub struct InMemoryPermissionOracle {
    grants: Arc<RwLock<HashSet<(Role, Address)>>>,
    paused: Arc<AtomicBool>,
}

impl InMemoryPermissionOracle {
    /// Empty oracle: no grants, not paused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style initial grant.
    #[must_use]
    pub fn with_role(self, role: Role, identity: Address) -> Self {
        self.grant_role(role, identity);
        self
    }
}

impl PermissionOracle for InMemoryPermissionOracle {
    fn has_role(&self, role: Role, caller: Address) -> bool {
        self.grants
            .read()
            .expect("permission lock poisoned")
            .contains(&(role, caller))
    }

    fn grant_role(&self, role: Role, identity: Address) {
        self.grants
            .write()
            .expect("permission lock poisoned")
            .insert((role, identity));
    }

    fn revoke_role(&self, role: Role, identity: Address) {
        self.grants
            .write()
            .expect("permission lock poisoned")
            .remove(&(role, identity));
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }
}
