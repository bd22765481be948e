//! Route records and the keyed route table.
//!
//! # Responsibilities
//! - Hand out stable `RouteId` handles on registration
//! - Remember each route's original template
//! - Rewrite effective paths when the base path changes
//!
//! # Design Decisions
//! - Callers hold ids, never references into the table
//! - Registration order is preserved; it is the ranking tie-break
//! - Rebasing keeps ids and default-ness intact

use serde::Serialize;

use crate::routing::segment::combine_paths;

/// Stable handle for one route registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteId(pub u64);

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

/// A route as seen by the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub id: RouteId,
    /// Effective path template.
    pub path: String,
    /// Fallback route, matched only when nothing else is.
    pub is_default: bool,
}

impl Route {
    /// Build a route directly from a template. An empty template is the
    /// default route.
    pub fn new(id: RouteId, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id,
            is_default: path.is_empty(),
            path,
        }
    }
}

/// A route held by a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredRoute {
    route: Route,
    /// Template as registered, before any base path was applied.
    original_path: String,
    name: Option<String>,
}

impl RegisteredRoute {
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn original_path(&self) -> &str {
        &self.original_path
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Ordered, keyed collection of registered routes.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    entries: Vec<RegisteredRoute>,
    next_id: u64,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` under `basepath` and return its handle.
    pub fn insert(&mut self, basepath: &str, path: &str) -> RouteId {
        self.insert_named(basepath, path, None)
    }

    /// Like [`RouteTable::insert`], attaching a display name.
    pub fn insert_named(&mut self, basepath: &str, path: &str, name: Option<&str>) -> RouteId {
        let id = RouteId(self.next_id);
        self.next_id += 1;

        self.entries.push(RegisteredRoute {
            route: Route {
                id,
                path: combine_paths(basepath, path),
                is_default: path.is_empty(),
            },
            original_path: path.to_string(),
            name: name.map(str::to_string),
        });
        id
    }

    /// Remove a route. Returns the removed entry, or `None` for an unknown id.
    pub fn remove(&mut self, id: RouteId) -> Option<RegisteredRoute> {
        let index = self.entries.iter().position(|e| e.route.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Recompute every effective path against a new base path.
    pub fn rebase(&mut self, basepath: &str) {
        for entry in &mut self.entries {
            entry.route.path = combine_paths(basepath, &entry.original_path);
        }
    }

    pub fn get(&self, id: RouteId) -> Option<&RegisteredRoute> {
        self.entries.iter().find(|e| e.route.id == id)
    }

    /// Routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.entries.iter().map(|e| &e.route)
    }

    /// Snapshot of the routes in registration order.
    pub fn to_vec(&self) -> Vec<Route> {
        self.routes().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
