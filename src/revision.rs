//! Version-control revision lookup.
//!
//! `--hash` stamps the current commit into the template. The hash comes
//! from `git rev-parse HEAD` in the working directory; any failure (git not
//! installed, not a repository, no commits yet) aborts the run. There is no
//! fallback value.

use std::io;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevisionError {
    #[error("cannot run git: {0}")]
    Launch(#[from] io::Error),
    #[error("git rev-parse failed: {0}")]
    Git(String),
}

/// Current commit hash from the ambient working directory.
pub fn read_revision() -> Result<String, RevisionError> {
    read_revision_in(Path::new("."))
}

/// Current commit hash for the repository containing `dir`.
pub fn read_revision_in(dir: &Path) -> Result<String, RevisionError> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(RevisionError::Git(stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
