//! # Route Table & Registry
//!
//! Forward map `selector -> Route` plus the derived reverse indices used by
//! introspection: `module -> selectors` and the module list. The registry is
//! rebuilt incrementally on every insert/remove and is never mutated on its
//! own, so a module appears in the list iff it owns at least one selector.

use crate::domain::entities::Route;
use crate::domain::value_objects::{Address, Hash, Selector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of a route write, distinguishing add from overwrite for events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteWrite {
    /// The selector was previously unrouted.
    Added,
    /// The selector pointed at `previous` before this write.
    Updated {
        /// The route being replaced.
        previous: Route,
    },
}

/// The route table with its reverse registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    routes: BTreeMap<Selector, Route>,
    by_module: BTreeMap<Address, BTreeSet<Selector>>,
}

impl RouteTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the route for a selector.
    #[must_use]
    pub fn resolve(&self, selector: Selector) -> Option<Route> {
        self.routes.get(&selector).copied()
    }

    /// Number of registered selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Write or overwrite a route, keeping the reverse registry consistent.
    pub fn insert(&mut self, selector: Selector, route: Route) -> RouteWrite {
        let previous = self.routes.insert(selector, route);

        if let Some(prev) = previous {
            if prev.module != route.module {
                self.unindex(prev.module, selector);
            }
        }
        self.by_module.entry(route.module).or_default().insert(selector);

        match previous {
            None => RouteWrite::Added,
            Some(previous) => RouteWrite::Updated { previous },
        }
    }

    /// Delete a route. Returns the removed route, or None if unrouted.
    pub fn remove(&mut self, selector: Selector) -> Option<Route> {
        let removed = self.routes.remove(&selector)?;
        self.unindex(removed.module, selector);
        Some(removed)
    }

    fn unindex(&mut self, module: Address, selector: Selector) {
        if let Some(set) = self.by_module.get_mut(&module) {
            set.remove(&selector);
            if set.is_empty() {
                self.by_module.remove(&module);
            }
        }
    }

    // =========================================================================
    // INTROSPECTION (read-only views)
    // =========================================================================

    /// Modules with at least one registered selector.
    #[must_use]
    pub fn modules(&self) -> Vec<Address> {
        self.by_module.keys().copied().collect()
    }

    /// Selectors routed to a given module.
    #[must_use]
    pub fn selectors_of(&self, module: Address) -> Vec<Selector> {
        self.by_module
            .get(&module)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// The module a selector forwards to.
    #[must_use]
    pub fn module_of(&self, selector: Selector) -> Option<Address> {
        self.routes.get(&selector).map(|r| r.module)
    }

    /// Full `(module, selectors)` enumeration.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Address, Vec<Selector>)> {
        self.by_module
            .iter()
            .map(|(module, set)| (*module, set.iter().copied().collect()))
            .collect()
    }

    /// Iterate over all `(selector, route)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Selector, Route)> + '_ {
        self.routes.iter().map(|(s, r)| (*s, *r))
    }
}

/// Convenience constructor for a [`Route`].
#[must_use]
pub fn route(module: Address, code_identity: Hash) -> Route {
    Route {
        module,
        code_identity,
    }
}
