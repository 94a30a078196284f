//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The tree is removed when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a tree of `dirs` nested directories each holding `files_per_dir` files.
    pub fn with_tree(dirs: usize, files_per_dir: usize) -> Self {
        let tree = Self::new();
        let mut current = PathBuf::new();
        for d in 0..dirs {
            current.push(format!("dir_{}", d));
            for f in 0..files_per_dir {
                tree.add_file(&current.join(format!("file_{}.txt", f)), "");
            }
        }
        tree
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add a directory, creating parents as needed.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a symlink at `link` pointing to `target`.
    pub fn add_symlink(&self, target: impl AsRef<Path>, link: impl AsRef<Path>) -> PathBuf {
        let full_path = self.dir.path().join(link);
        symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }

    /// Set the permission bits of a path inside the tree.
    pub fn set_mode(&self, path: impl AsRef<Path>, mode: u32) {
        let full_path = self.dir.path().join(path);
        fs::set_permissions(&full_path, fs::Permissions::from_mode(mode))
            .expect("Failed to set permissions");
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
