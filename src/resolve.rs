//! Asset pattern resolution.
//!
//! Turns a user-supplied locator into the ordered list of files it names.
//! Three locator shapes are accepted:
//!
//! - **Glob** (contains `*`, `?` or `[`): expanded with
//!   [glob](https://docs.rs/glob), including `**` recursive matching. One
//!   layer of matching surrounding quotes is stripped first, so a
//!   shell-quoted pattern that reached us as a literal string still works.
//! - **Directory**: immediate entries whose name ends with the asset
//!   extension, joined to the directory path. Not recursive.
//! - **File**: the path itself, unchanged.
//!
//! Resolution order is whatever the source yields: alphabetical for
//! globs, unsorted `read_dir` order for directories.
//!
//! A non-glob path that does not exist is an error naming the original
//! pattern, never a silent empty list. A glob that matches nothing is an
//! empty list, not an error.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("file or folder not found: {0}")]
    NotFound(String),
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("glob read error: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve an asset pattern into the files it names.
///
/// `extension` is the literal name suffix used for directory scans
/// (`".css"` / `".js"`). The suffix match is on the entry name only, so a
/// directory named `theme.css` would be listed too.
pub fn resolve(pattern: &str, extension: &str) -> Result<Vec<PathBuf>, ResolveError> {
    if has_glob_metachars(pattern) {
        return expand_glob(pattern);
    }

    let path = PathBuf::from(pattern);
    let meta = fs::metadata(&path).map_err(|_| ResolveError::NotFound(pattern.to_string()))?;

    if meta.is_dir() {
        let files = fs::read_dir(&path)?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(extension))
            .map(|e| e.path())
            .collect();
        Ok(files)
    } else if meta.is_file() {
        Ok(vec![path])
    } else {
        // Stats fine but is neither a directory nor a regular file
        // (socket, fifo, device). Nothing to inject.
        Ok(Vec::new())
    }
}

fn has_glob_metachars(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Strip one layer of matching surrounding quotes, if present.
fn strip_quotes(pattern: &str) -> &str {
    let bytes = pattern.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &pattern[1..pattern.len() - 1];
        }
    }
    pattern
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, ResolveError> {
    let unquoted = strip_quotes(pattern);
    let matches = glob::glob(unquoted).map_err(|source| ResolveError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in matches {
        let path = entry?;
        // Globs like `dist/*` can match directories. Only files can be
        // read or referenced, so everything else is skipped.
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
