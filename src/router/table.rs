//! Immutable route table.

use std::collections::HashMap;

/// Mapping from route name to handler, fixed at construction.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: HashMap<String, H>,
}

impl<H> RouteTable<H> {
    /// Start building a table.
    pub fn builder() -> RouteTableBuilder<H> {
        RouteTableBuilder {
            routes: HashMap::new(),
        }
    }

    /// Handler registered for `name`.
    pub fn get(&self, name: &str) -> Option<&H> {
        self.routes.get(name)
    }

    /// Whether `name` is a registered route.
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Registered route names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Builder for [`RouteTable`].
#[derive(Debug)]
pub struct RouteTableBuilder<H> {
    routes: HashMap<String, H>,
}

impl<H> RouteTableBuilder<H> {
    /// Register a route; a later registration of the same name wins.
    pub fn route(mut self, name: impl Into<String>, handler: H) -> Self {
        self.routes.insert(name.into(), handler);
        self
    }

    /// Finish the table.
    pub fn build(self) -> RouteTable<H> {
        RouteTable {
            routes: self.routes,
        }
    }
}
