//! Load a route tree into a mount target.
//!
//! # Responsibilities
//! - Discover route files under the root
//! - Resolve each file's router from the registry
//! - Tag and mount routers in prefix order
//!
//! # Design Decisions
//! - Fail fast: the first error aborts the load and nothing is retried
//! - A file without a registered router is skipped unless strict
//! - Verbose mode only changes log levels, never behaviour

use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::LoaderConfig;
use crate::observability::logging::progress;
use crate::routing::discovery::{discover, Discovery, SkipReason, SkippedFile};
use crate::routing::error::LoadError;
use crate::routing::registry::RouteRegistry;
use crate::routing::target::{MountTarget, MountedRoute};

/// Outcome of a load run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Mounted routes, in mount order.
    pub mounted: Vec<MountedRoute>,

    /// Files that were seen but not mounted.
    pub skipped: Vec<SkippedFile>,

    /// Registry keys that matched no route file.
    pub unused_keys: Vec<String>,

    /// Wall time spent loading.
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Skipped files with the given reason.
    pub fn skipped_for(&self, reason: SkipReason) -> impl Iterator<Item = &SkippedFile> {
        self.skipped.iter().filter(move |s| s.reason == reason)
    }
}

/// Load every route file under `root` into `target`.
///
/// Each eligible file's router is looked up in `registry` by its module key
/// and mounted at the prefix derived from its location. The target is
/// mutated in place; the report describes what was mounted and skipped.
pub fn load_routes<S, T>(
    target: &mut T,
    root: &Path,
    registry: &RouteRegistry<S>,
    config: &LoaderConfig,
) -> Result<LoadReport, LoadError>
where
    S: Clone + Send + Sync + 'static,
    T: MountTarget<S> + ?Sized,
{
    let start = Instant::now();
    let verbose = config.verbose;
    progress!(verbose, root = %root.display(), "Loading routes");

    let Discovery { files, mut skipped } = discover(root, config)?;

    let mut resolved = Vec::with_capacity(files.len());
    for file in &files {
        match registry.resolve(&file.module_key) {
            Some(router) => resolved.push((file, router)),
            None if config.strict => {
                return Err(LoadError::MissingRouter {
                    key: file.module_key.clone(),
                    path: file.path.clone(),
                });
            }
            None => {
                progress!(
                    verbose,
                    module_key = %file.module_key,
                    "Route file {} does not provide a router",
                    file.path.display()
                );
                skipped.push(SkippedFile {
                    path: file.path.clone(),
                    reason: SkipReason::NoRouter,
                });
            }
        }
    }

    let unused_keys: Vec<String> = registry
        .keys()
        .filter(|key| !files.iter().any(|f| f.module_key == *key))
        .map(str::to_string)
        .collect();
    for key in &unused_keys {
        tracing::warn!(module_key = %key, "Registered router matches no route file");
    }

    // `files` is sorted by prefix, so `resolved` is too.
    let mut mounted = Vec::with_capacity(resolved.len());
    for (file, file_router) in resolved {
        let (router, mut tags) = file_router.into_parts();
        if config.auto_tags {
            let tag = file.tag();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let route = MountedRoute {
            prefix: file.prefix.clone(),
            tags,
            module_key: file.module_key.clone(),
            source: file.path.clone(),
        };
        progress!(verbose, tags = ?route.tags, "Loaded router with path {}", file.display_prefix());

        target.include_router(route.clone(), router);
        mounted.push(route);
    }

    let elapsed = start.elapsed();
    progress!(
        verbose,
        mounted = mounted.len(),
        skipped = skipped.len(),
        "Routes loaded in {:.2}s",
        elapsed.as_secs_f64()
    );

    Ok(LoadReport {
        mounted,
        skipped,
        unused_keys,
        elapsed,
    })
}
