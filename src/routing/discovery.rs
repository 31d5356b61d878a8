//! Route tree discovery.
//!
//! # Responsibilities
//! - Walk the route directory recursively
//! - Filter out ignored, foreign and misspelled files
//! - Derive a `RouteFile` (prefix, params, registry key) per eligible file
//!
//! # Design Decisions
//! - Ignored directories are pruned with their whole subtree
//! - Output is sorted by prefix so repeated runs are identical
//! - Two files mounting at the same prefix is an error, not a silent override

use serde::Serialize;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::LoaderConfig;
use crate::observability::logging::progress;
use crate::routing::error::LoadError;
use crate::routing::path;

/// A route file discovered in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteFile {
    /// Path on disk, as walked from the root.
    pub path: PathBuf,

    /// Path relative to the route root.
    pub relative: PathBuf,

    /// Registry key (`users/[user_id]/route`).
    pub module_key: String,

    /// Mount prefix (`/users/{user_id}`), empty for the root.
    pub prefix: String,

    /// Path parameter names along the prefix, outermost first.
    pub params: Vec<String>,

    /// True if any segment of the prefix is a path parameter.
    pub dynamic: bool,

    /// True for the base-route marker file.
    pub index: bool,
}

impl RouteFile {
    /// Documentation tag derived from the prefix.
    pub fn tag(&self) -> String {
        path::derive_tag(&self.prefix)
    }

    /// Prefix for display: the root shows as `/`.
    pub fn display_prefix(&self) -> &str {
        if self.prefix.is_empty() {
            "/"
        } else {
            &self.prefix
        }
    }
}

/// Why a candidate file was not turned into a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Name matches the ignore prefix or an ignored stem.
    Ignored,
    /// Stem contains the base-route marker without being it.
    Misspelled,
    /// No router registered for the file's module key.
    NoRouter,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Ignored => write!(f, "ignored"),
            SkipReason::Misspelled => write!(f, "possibly misspelled route file"),
            SkipReason::NoRouter => write!(f, "no router registered"),
        }
    }
}

/// A file that was seen but not mounted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of walking a route tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Discovery {
    /// Eligible route files, sorted by prefix.
    pub files: Vec<RouteFile>,

    /// Candidate files that were skipped.
    pub skipped: Vec<SkippedFile>,
}

/// Walk `root` and derive a route file for every eligible file.
pub fn discover(root: &Path, config: &LoaderConfig) -> Result<Discovery, LoadError> {
    let metadata = fs::metadata(root).map_err(|source| LoadError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(LoadError::NotADirectory(root.to_path_buf()));
    }

    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_pruned_dir(entry, config));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        // walkdir yields paths under the root it was given
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        match classify(relative, config)? {
            Candidate::Route(route) => {
                tracing::trace!(
                    module_key = %route.module_key,
                    prefix = %route.display_prefix(),
                    "Discovered route file"
                );
                discovery.files.push(RouteFile {
                    path: entry.path().to_path_buf(),
                    ..route
                });
            }
            Candidate::Skip(reason) => {
                if reason == SkipReason::Misspelled {
                    progress!(
                        config.verbose,
                        file = %relative.display(),
                        "Skipping possibly misspelled route file"
                    );
                }
                discovery.skipped.push(SkippedFile {
                    path: entry.path().to_path_buf(),
                    reason,
                });
            }
            Candidate::Foreign => {}
        }
    }

    discovery
        .files
        .sort_by(|a, b| a.prefix.cmp(&b.prefix).then_with(|| a.module_key.cmp(&b.module_key)));

    if let Some(pair) = discovery.files.windows(2).find(|pair| pair[0].prefix == pair[1].prefix) {
        return Err(LoadError::DuplicatePrefix {
            prefix: pair[0].display_prefix().to_string(),
            first: pair[0].path.clone(),
            second: pair[1].path.clone(),
        });
    }

    Ok(discovery)
}

enum Candidate {
    Route(RouteFile),
    Skip(SkipReason),
    /// Not a route file at all (other extension); not reported.
    Foreign,
}

fn is_hidden_or_ignored(name: &str, config: &LoaderConfig) -> bool {
    name.starts_with('.') || name.starts_with(config.ignore_prefix.as_str())
}

fn is_pruned_dir(entry: &DirEntry, config: &LoaderConfig) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map_or(true, |name| is_hidden_or_ignored(name, config))
}

/// Decide what a root-relative file path is.
fn classify(relative: &Path, config: &LoaderConfig) -> Result<Candidate, LoadError> {
    let Some(name) = relative.file_name().and_then(OsStr::to_str) else {
        return Ok(Candidate::Foreign);
    };
    if is_hidden_or_ignored(name, config) {
        return Ok(Candidate::Skip(SkipReason::Ignored));
    }
    if relative.extension().and_then(OsStr::to_str) != Some(config.extension.as_str()) {
        return Ok(Candidate::Foreign);
    }

    let Some(stem) = relative.file_stem().and_then(OsStr::to_str) else {
        return Ok(Candidate::Foreign);
    };
    if config.ignored_stems.iter().any(|ignored| ignored == stem) {
        return Ok(Candidate::Skip(SkipReason::Ignored));
    }
    if stem.contains(config.index_stem.as_str()) && stem != config.index_stem {
        return Ok(Candidate::Skip(SkipReason::Misspelled));
    }

    // Pruning already rejected non-UTF-8 directory names.
    let dirs: Vec<&str> = relative
        .parent()
        .map(|parent| parent.iter().filter_map(OsStr::to_str).collect())
        .unwrap_or_default();

    let mut params = Vec::new();
    for segment in dirs.iter().copied().chain(std::iter::once(stem)) {
        path::validate_segment(segment).map_err(|reason| LoadError::InvalidSegment {
            path: relative.to_path_buf(),
            segment: segment.to_string(),
            reason,
        })?;
        for name in path::param_names(segment) {
            if params.contains(&name) {
                return Err(LoadError::InvalidSegment {
                    path: relative.to_path_buf(),
                    segment: segment.to_string(),
                    reason: "path parameter name repeated along the route",
                });
            }
            params.push(name);
        }
    }

    let prefix = path::derive_prefix(&dirs, stem, &config.index_stem);

    Ok(Candidate::Route(RouteFile {
        path: relative.to_path_buf(),
        relative: relative.to_path_buf(),
        module_key: path::module_key(relative),
        dynamic: !params.is_empty(),
        params,
        prefix,
        index: stem == config.index_stem,
    }))
}
