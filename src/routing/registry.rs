//! Route registry: module key → router factory.
//!
//! A route file cannot be imported at runtime, so the application registers
//! the router each file provides under the file's module key
//! (`users/[user_id]/route`). The directory tree decides where a router is
//! mounted; the registry decides what is mounted.

use axum::Router;
use std::collections::BTreeMap;
use std::fmt;

/// The router a route file provides, plus the tags its author declared.
pub struct FileRouter<S = ()> {
    router: Router<S>,
    tags: Vec<String>,
}

impl<S> FileRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(router: Router<S>) -> Self {
        Self {
            router,
            tags: Vec::new(),
        }
    }

    /// Replace the declared tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Add one declared tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn router(&self) -> &Router<S> {
        &self.router
    }

    pub fn into_parts(self) -> (Router<S>, Vec<String>) {
        (self.router, self.tags)
    }
}

impl<S> From<Router<S>> for FileRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn from(router: Router<S>) -> Self {
        Self::new(router)
    }
}

impl<S> fmt::Debug for FileRouter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRouter").field("tags", &self.tags).finish_non_exhaustive()
    }
}

type RouterFactory<S> = Box<dyn Fn() -> FileRouter<S> + Send + Sync>;

/// Registered router factories keyed by module key.
///
/// Factories are called on every load, so loading the same tree twice into
/// fresh applications produces identical route tables.
pub struct RouteRegistry<S = ()> {
    factories: BTreeMap<String, RouterFactory<S>>,
}

impl<S> RouteRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register the router factory for a route file.
    ///
    /// Registering the same key twice replaces the earlier factory.
    pub fn register<F, R>(&mut self, key: &str, factory: F) -> &mut Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: Into<FileRouter<S>>,
    {
        let key = normalize_key(key);
        if self.factories.contains_key(&key) {
            tracing::warn!(module_key = %key, "Replacing registered router");
        }
        self.factories.insert(key, Box::new(move || factory().into()));
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F, R>(mut self, key: &str, factory: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: Into<FileRouter<S>>,
    {
        self.register(key, factory);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build the router registered for `key`.
    pub fn resolve(&self, key: &str) -> Option<FileRouter<S>> {
        self.factories.get(&normalize_key(key)).map(|factory| factory())
    }
}

impl<S> Default for RouteRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for RouteRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("keys", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Normalize a module key: `./users\route.rs` → `users/route`.
pub fn normalize_key(key: &str) -> String {
    let key = key.replace('\\', "/");
    let key = key.trim_start_matches("./").trim_start_matches('/');
    key.strip_suffix(".rs").unwrap_or(key).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    fn users() -> Router {
        Router::new().route("/", get(|| async { "users" }))
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("users/route"), "users/route");
        assert_eq!(normalize_key("./users/route.rs"), "users/route");
        assert_eq!(normalize_key("/users/[user_id]"), "users/[user_id]");
        assert_eq!(normalize_key("users\\route.rs"), "users/route");
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry: RouteRegistry = RouteRegistry::new();
        registry.register("users/route", users);
        registry.register("./users/[user_id].rs", || FileRouter::new(users()).tag("users"));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("/users/route"));
        assert!(registry.resolve("users/missing").is_none());

        let resolved = registry.resolve("users/[user_id]").unwrap();
        assert_eq!(resolved.tags(), ["users".to_string()]);
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let registry: RouteRegistry =
            RouteRegistry::new().with("health", || FileRouter::new(users()).with_tags(["ops"]));

        let first = registry.resolve("health").unwrap();
        let second = registry.resolve("health").unwrap();
        assert_eq!(first.tags(), second.tags());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry: RouteRegistry = RouteRegistry::new();
        registry.register("health", || FileRouter::new(users()).tag("old"));
        registry.register("health.rs", || FileRouter::new(users()).tag("new"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("health").unwrap().tags(), ["new".to_string()]);
    }

    #[test]
    fn test_keys_sorted() {
        let registry: RouteRegistry = RouteRegistry::new()
            .with("users/route", users)
            .with("documents/route", users);
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["documents/route", "users/route"]);
    }
}
