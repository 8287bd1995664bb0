//! In-memory module host.
//!
//! Dev/test stand-in for the real execution host: modules are registered as
//! code bytes plus a handler closure. Code can be swapped after registration,
//! which is exactly how tests exercise the code-swap attack the hot path
//! defends against.

use crate::domain::value_objects::{Address, Bytes};
use crate::ports::outbound::{ModuleFailure, ModuleHost};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Handler signature: calldata in, success payload or failure payload out.
pub type ModuleHandler = Arc<dyn Fn(&[u8]) -> Result<Vec<u8>, Vec<u8>> + Send + Sync>;

struct DeployedModule {
    code: Bytes,
    handler: ModuleHandler,
}

/// In-memory [`ModuleHost`] implementation.
#[derive(Clone, Default)]
pub struct InMemoryModuleHost {
    modules: Arc<RwLock<HashMap<Address, DeployedModule>>>,
}

impl InMemoryModuleHost {
    /// Empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy (or redeploy) a module: its code bytes and its behavior.
    pub fn deploy(&self, module: Address, code: Bytes, handler: ModuleHandler) {
        self.modules
            .write()
            .expect("module host lock poisoned")
            .insert(module, DeployedModule { code, handler });
    }

    /// Replace only the code bytes, keeping the handler.
    ///
    /// Changes the module's code identity without changing behavior, which
    /// makes identity drift observable in isolation.
    pub fn swap_code(&self, module: Address, code: Bytes) {
        let mut modules = self.modules.write().expect("module host lock poisoned");
        if let Some(deployed) = modules.get_mut(&module) {
            deployed.code = code;
        }
    }

    /// Remove a deployed module entirely.
    pub fn undeploy(&self, module: Address) {
        self.modules
            .write()
            .expect("module host lock poisoned")
            .remove(&module);
    }
}

impl ModuleHost for InMemoryModuleHost {
    fn code(&self, module: Address) -> Option<Bytes> {
        self.modules
            .read()
            .expect("module host lock poisoned")
            .get(&module)
            .map(|m| m.code.clone())
    }

    fn call(&self, module: Address, calldata: &[u8]) -> Result<Bytes, ModuleFailure> {
        let handler = {
            let modules = self.modules.read().expect("module host lock poisoned");
            modules.get(&module).map(|m| Arc::clone(&m.handler))
        };

        match handler {
            Some(handler) => handler(calldata).map_err(|payload| ModuleFailure { payload }),
            None => Err(ModuleFailure {
                payload: Vec::new(),
            }),
        }
    }
}
