//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FileRouterConfig (validated, immutable)
//!     → LoaderConfig handed to the route loader, the rest to the binary
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::FileRouterConfig;
pub use schema::LoaderConfig;
pub use schema::ObservabilityConfig;
pub use schema::ServerConfig;
