//! Shared utilities for route tree integration tests.

use std::fs::{self, File};
use std::path::Path;
use tempfile::TempDir;

/// A temporary route tree on disk.
pub struct RouteTree {
    dir: TempDir,
}

impl RouteTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create the given files (and their parent directories).
    pub fn with_files(files: &[&str]) -> Self {
        let tree = Self::new();
        for file in files {
            tree.touch(file);
        }
        tree
    }

    pub fn touch(&self, relative: &str) {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
