//! HTTP preview subsystem.
//!
//! # Data Flow
//! ```text
//! route tree
//!     → preview.rs (placeholder router per route file)
//!     → routing::load_routes (mount on App)
//!     → server.rs (introspection route, middleware, serve)
//! ```

pub mod preview;
pub mod server;

pub use server::{shutdown_signal, PreviewServer, ROUTES_PATH};
