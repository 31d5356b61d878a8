//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing::loader, http::server
//!     → logging.rs (structured log events, verbosity-aware progress)
//!     → tracing-subscriber (stdout, pretty or JSON)
//! ```

pub mod logging;
