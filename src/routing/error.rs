//! Errors raised while loading a route tree.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for route discovery and mounting.
///
/// Loading is fail-fast: the first error aborts the run and nothing is
/// retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("route root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk route tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid route segment `{segment}` in {}: {reason}", .path.display())]
    InvalidSegment {
        path: PathBuf,
        segment: String,
        reason: &'static str,
    },

    #[error("route file {} has no registered router (module key `{key}`)", .path.display())]
    MissingRouter { key: String, path: PathBuf },

    #[error("route files {} and {} both mount at `{prefix}`", .first.display(), .second.display())]
    DuplicatePrefix {
        prefix: String,
        first: PathBuf,
        second: PathBuf,
    },
}
