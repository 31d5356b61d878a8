//! File-based routing for axum.
//!
//! Walks a directory of route files and mounts one router per file, deriving
//! the URL prefix from the file's location:
//!
//! ```text
//! api/users/route.rs               → /users
//! api/users/[user_id].rs           → /users/{user_id}
//! api/documents/[document_id]/route.rs → /documents/{document_id}
//! ```
//!
//! Routers are supplied through a [`RouteRegistry`] keyed by each file's
//! module key and mounted with [`load_routes`].

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::{FileRouterConfig, LoaderConfig};
pub use routing::{
    load_routes, App, FileRouter, LoadError, LoadReport, MountTarget, RouteRegistry, RouteTable,
};
