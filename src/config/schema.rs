//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the file router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FileRouterConfig {
    /// Route tree conventions and loader behaviour.
    pub loader: LoaderConfig,

    /// Preview server settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Naming conventions and switches for loading a route tree.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    /// Extension of route files, without the dot.
    pub extension: String,

    /// Stem of the base-route marker file (mounts at its directory's prefix).
    pub index_stem: String,

    /// Files and directories starting with this prefix are ignored.
    pub ignore_prefix: String,

    /// File stems that are never route files (e.g. `mod`).
    pub ignored_stems: Vec<String>,

    /// Append a tag derived from the mount prefix to every router.
    pub auto_tags: bool,

    /// Treat a route file without a registered router as an error.
    pub strict: bool,

    /// Log loader progress at info level instead of debug.
    pub verbose: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extension: "rs".to_string(),
            index_stem: "route".to_string(),
            ignore_prefix: "__".to_string(),
            ignored_stems: vec!["mod".to_string()],
            auto_tags: true,
            strict: false,
            verbose: false,
        }
    }
}

/// Preview server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
