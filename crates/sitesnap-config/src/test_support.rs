//! Scratch directory trees for config tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree, removed on drop.
pub struct SiteDirs(TempDir);

impl SiteDirs {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` (and parents) under the root.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `body` to `rel`, creating parents.
    pub fn file(&self, rel: &str, body: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, body).unwrap();
        path
    }

    /// Writes a `.sitesnap.toml` into `rel`; an empty `rel` means the root.
    pub fn config(&self, rel: &str, body: &str) -> PathBuf {
        self.dir(rel);
        self.file(&Path::new(rel).join(CONFIG_FILENAME).to_string_lossy(), body)
    }
}
