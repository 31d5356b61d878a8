//! Placeholder routers for previewing a route tree.
//!
//! Every discovered route file gets a router answering `GET` with a JSON
//! description of the file and the path parameters captured for the request.

use axum::{extract::Path, routing::get, Json, Router};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::routing::{FileRouter, RouteFile, RouteRegistry};

/// Body returned by a preview route.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePreview {
    pub route: String,
    pub module_key: String,
    pub source: String,
    pub params: BTreeMap<String, String>,
}

impl RoutePreview {
    fn new(file: &RouteFile, params: BTreeMap<String, String>) -> Self {
        Self {
            route: file.display_prefix().to_string(),
            module_key: file.module_key.clone(),
            source: file.relative.display().to_string(),
            params,
        }
    }
}

/// Router standing in for a route file's real handlers.
pub fn preview_router(file: &Arc<RouteFile>) -> FileRouter {
    let file = Arc::clone(file);

    // Path<_> rejects routes without parameters, so static routes get their own handler.
    let router = if file.params.is_empty() {
        Router::new().route(
            "/",
            get(move || {
                let file = Arc::clone(&file);
                async move { Json(RoutePreview::new(&file, BTreeMap::new())) }
            }),
        )
    } else {
        Router::new().route(
            "/",
            get(move |Path(params): Path<BTreeMap<String, String>>| {
                let file = Arc::clone(&file);
                async move { Json(RoutePreview::new(&file, params)) }
            }),
        )
    };

    FileRouter::new(router).tag("preview")
}

/// Registry with a preview router for every discovered file.
pub fn preview_registry(files: &[RouteFile]) -> RouteRegistry {
    let mut registry = RouteRegistry::new();
    for file in files {
        let file = Arc::new(file.clone());
        let key = file.module_key.clone();
        registry.register(&key, move || preview_router(&file));
    }
    registry
}
