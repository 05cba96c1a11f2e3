//! Shared test utilities for the graft test suite.
//!
//! Fixtures are plain temp trees built per test: each test owns a
//! `TempDir` and populates it with [`write_file`], so tests never share
//! state or touch the repository.

use std::fs;
use std::path::{Path, PathBuf};

/// Write `content` to `root`/`rel`, creating parent directories as needed.
///
/// Returns the full path.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
