//! Preview HTTP server.
//!
//! # Responsibilities
//! - Load a route tree with preview routers
//! - Expose the aggregated route table at `/__routes`
//! - Wire up middleware (tracing, timeout)
//! - Serve until the shutdown future resolves

use axum::{routing::get, Json, Router};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{FileRouterConfig, ServerConfig};
use crate::http::preview::preview_registry;
use crate::routing::{discover, App, LoadError, RouteTable};

/// Introspection endpoint. Names starting with `__` are never route files,
/// so this path cannot collide with the tree.
pub const ROUTES_PATH: &str = "/__routes";

/// HTTP server previewing a route tree.
pub struct PreviewServer {
    router: Router,
    routes: RouteTable,
    config: ServerConfig,
}

impl PreviewServer {
    /// Discover `root` and mount a preview router for every route file.
    pub fn from_directory(root: &Path, config: &FileRouterConfig) -> Result<Self, LoadError> {
        let discovery = discover(root, &config.loader)?;
        let registry = preview_registry(&discovery.files);

        let mut app = App::new();
        let report = app.load_routes(root, &registry, &config.loader)?;
        tracing::info!(
            mounted = report.mounted_count(),
            skipped = report.skipped.len(),
            "Preview routes mounted"
        );

        let (router, routes) = app.into_parts();
        let router = Self::build_router(router, routes.clone(), &config.server);
        Ok(Self {
            router,
            routes,
            config: config.server.clone(),
        })
    }

    /// Add the introspection route and middleware layers.
    #[allow(deprecated)]
    fn build_router(router: Router, routes: RouteTable, config: &ServerConfig) -> Router {
        let routes = Arc::new(routes);
        router
            .route(
                ROUTES_PATH,
                get(move || {
                    let routes = Arc::clone(&routes);
                    async move { Json(routes.as_ref().clone()) }
                }),
            )
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, routes = self.routes.len(), "Preview server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Preview server stopped");
        Ok(())
    }
}

/// Wait for Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::fs::{self, File};
    use tower::ServiceExt;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_preview_dynamic_route() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "users/[user_id].rs");

        let config = FileRouterConfig::default();
        let server = PreviewServer::from_directory(dir.path(), &config).unwrap();
        let (status, body) = get_json(server.router(), "/users/42").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"], "/users/{user_id}");
        assert_eq!(body["module_key"], "users/[user_id]");
        assert_eq!(body["params"]["user_id"], "42");
    }

    #[tokio::test]
    async fn test_routes_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "health.rs");
        touch(dir.path(), "users/route.rs");

        let config = FileRouterConfig::default();
        let server = PreviewServer::from_directory(dir.path(), &config).unwrap();
        assert_eq!(server.routes().prefixes(), vec!["/health", "/users"]);

        let (status, body) = get_json(server.router(), ROUTES_PATH).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["prefix"], "/health");
        assert_eq!(body[0]["tags"], serde_json::json!(["preview", "/health"]));
        assert_eq!(body[1]["prefix"], "/users");
    }
}
