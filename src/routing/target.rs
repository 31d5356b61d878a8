//! Mount targets and the aggregated route table.
//!
//! # Responsibilities
//! - Abstract over "mount a sub-router at a prefix with tags"
//! - Record every mount in an ordered `RouteTable`
//!
//! # Design Decisions
//! - `axum::Router` is a target on its own; tags are dropped there
//! - `App` keeps the table next to the router for inspection and docs
//! - The empty prefix merges at the root, axum refuses to nest at `/`

use axum::Router;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::LoaderConfig;
use crate::routing::error::LoadError;
use crate::routing::loader::{load_routes, LoadReport};
use crate::routing::registry::RouteRegistry;

/// One entry of the aggregated route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountedRoute {
    /// Mount prefix, empty for the root.
    pub prefix: String,

    /// Declared tags followed by the derived tag (if auto tags is on).
    pub tags: Vec<String>,

    /// Registry key of the route file.
    pub module_key: String,

    /// Route file on disk.
    pub source: PathBuf,
}

/// Ordered collection of mounted routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<MountedRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: MountedRoute) {
        self.routes.push(route);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MountedRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Mount prefixes in table order.
    pub fn prefixes(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.prefix.as_str()).collect()
    }

    pub fn find(&self, prefix: &str) -> Option<&MountedRoute> {
        self.routes.iter().find(|r| r.prefix == prefix)
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a MountedRoute;
    type IntoIter = std::slice::Iter<'a, MountedRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Something a route file's router can be mounted on.
pub trait MountTarget<S> {
    /// Mount `router` under `route.prefix` with `route.tags`.
    fn include_router(&mut self, route: MountedRoute, router: Router<S>);
}

impl<S> MountTarget<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn include_router(&mut self, route: MountedRoute, router: Router<S>) {
        let current = std::mem::take(self);
        *self = if route.prefix.is_empty() {
            current.merge(router)
        } else {
            current.nest(&route.prefix, router)
        };
    }
}

/// An axum router together with the table of everything mounted on it.
pub struct App<S = ()> {
    router: Router<S>,
    routes: RouteTable,
}

impl<S> App<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::from_router(Router::new())
    }

    /// Start from an existing router (hand-written routes, fallbacks).
    pub fn from_router(router: Router<S>) -> Self {
        Self {
            router,
            routes: RouteTable::new(),
        }
    }

    /// Load a route tree into this application.
    pub fn load_routes(
        &mut self,
        root: impl AsRef<Path>,
        registry: &RouteRegistry<S>,
        config: &LoaderConfig,
    ) -> Result<LoadReport, LoadError> {
        load_routes(self, root.as_ref(), registry, config)
    }

    pub fn router(&self) -> &Router<S> {
        &self.router
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn into_router(self) -> Router<S> {
        self.router
    }

    pub fn into_parts(self) -> (Router<S>, RouteTable) {
        (self.router, self.routes)
    }
}

impl<S> Default for App<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> MountTarget<S> for App<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn include_router(&mut self, route: MountedRoute, router: Router<S>) {
        self.router.include_router(route.clone(), router);
        self.routes.push(route);
    }
}
