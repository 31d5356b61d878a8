//! Routing subsystem: directory tree → route table.
//!
//! # Data Flow
//! ```text
//! Route tree on disk
//!     → discovery.rs (walk, filter, derive RouteFile per file)
//!     → path.rs (bracket → `{param}`, prefix and tag derivation)
//!     → registry.rs (module key → FileRouter)
//!     → loader.rs (tag, sort, mount)
//!     → target.rs (axum::Router or App + RouteTable)
//! ```
//!
//! # Convention
//! ```text
//! api/
//!     route.rs              → /
//!     health.rs             → /health
//!     users/
//!         route.rs          → /users
//!         [user_id].rs      → /users/{user_id}
//!     documents/
//!         [document_id]/
//!             route.rs      → /documents/{document_id}
//! ```
//!
//! # Design Decisions
//! - Routes are loaded once at startup, immutable afterwards
//! - Deterministic: the same tree always yields the same table
//! - Mounting is delegated to axum (`nest`/`merge`)

pub mod discovery;
pub mod error;
pub mod loader;
pub mod path;
pub mod registry;
pub mod target;

pub use discovery::{discover, Discovery, RouteFile, SkipReason, SkippedFile};
pub use error::LoadError;
pub use loader::{load_routes, LoadReport};
pub use registry::{FileRouter, RouteRegistry};
pub use target::{App, MountTarget, MountedRoute, RouteTable};
