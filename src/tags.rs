//! HTML fragment generation for resolved asset files.
//!
//! Each resolved file becomes exactly one fragment, in one of two shapes:
//!
//! ```text
//! Linked (default)
//!   css:  <link rel="stylesheet" href="dist/css/app.css">
//!   js:   <script src="dist/js/app.js"></script>
//!         <script src="dist/js/app.js" async></script>     (--async)
//!         <script src="dist/js/app.js" defer></script>     (--defer)
//!
//! Inline (--inline)
//!   css:  <style>body { margin: 0; }</style>
//!   js:   <script>console.log("app");</script>
//! ```
//!
//! Linked paths can be shortened with an ignore prefix and suffixed with a
//! `?etag=<digest>` cache-buster. Inline bodies are spliced in verbatim via
//! [`PreEscaped`]; a body containing a closing tag or an inject marker is the
//! caller's problem.
//!
//! Fragment order always equals file order. Rendering is per-file
//! independent (reads, digests) and runs on a rayon parallel iterator; the
//! ordered collect keeps the 1:1 order guarantee.

use maud::{PreEscaped, html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Asset kind, carrying the wire shape of its tags and the name suffix
/// used for directory scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    Js,
}

impl AssetKind {
    /// Literal name suffix matched when a pattern resolves to a directory.
    pub fn extension(self) -> &'static str {
        match self {
            AssetKind::Css => ".css",
            AssetKind::Js => ".js",
        }
    }
}

/// Output shape for generated tags.
///
/// `script_async` and `script_defer` are not validated against each other:
/// when both are set, only `async` is emitted.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Embed file contents in `<style>`/`<script>` bodies instead of
    /// referencing paths.
    pub inline: bool,
    /// Leading characters sliced off emitted paths. Length-based, not a
    /// validated prefix match.
    pub ignore_prefix: Option<String>,
    /// Append `?etag=<digest>` to emitted paths. Ignored when inlining.
    pub etag: bool,
    /// Emit `async` on script tags.
    pub script_async: bool,
    /// Emit `defer` on script tags. Loses to `script_async`.
    pub script_defer: bool,
}

/// Generate one HTML fragment per file, preserving input order 1:1.
pub fn generate_tags(
    files: &[PathBuf],
    kind: AssetKind,
    options: &RenderOptions,
) -> Result<Vec<String>, TagError> {
    files
        .par_iter()
        .map(|path| render_fragment(path, kind, options))
        .collect()
}

fn render_fragment(
    path: &Path,
    kind: AssetKind,
    options: &RenderOptions,
) -> Result<String, TagError> {
    if options.inline {
        inline_fragment(path, kind)
    } else {
        linked_fragment(path, kind, options)
    }
}

fn inline_fragment(path: &Path, kind: AssetKind) -> Result<String, TagError> {
    let content = fs::read_to_string(path).map_err(|source| TagError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let markup = match kind {
        AssetKind::Css => html! { style { (PreEscaped(&content)) } },
        AssetKind::Js => html! { script { (PreEscaped(&content)) } },
    };
    Ok(markup.into_string())
}

fn linked_fragment(
    path: &Path,
    kind: AssetKind,
    options: &RenderOptions,
) -> Result<String, TagError> {
    let mut href = path.to_string_lossy().into_owned();

    if let Some(prefix) = &options.ignore_prefix {
        href = strip_prefix_chars(&href, prefix);
    }

    if options.etag {
        let digest = hash_file(path).map_err(|source| TagError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        href = format!("{href}?etag={digest}");
    }

    let markup = match kind {
        AssetKind::Css => html! { link rel="stylesheet" href=(href); },
        AssetKind::Js => {
            let with_async = options.script_async;
            let with_defer = options.script_defer && !options.script_async;
            html! { script src=(href) async[with_async] defer[with_defer] {} }
        }
    };
    Ok(markup.into_string())
}

/// Slice `prefix.chars().count()` characters off the front of `path`.
///
/// The slice is length-based, never prefix-validated: a path that does not
/// start with the prefix still loses the same character count. Counting
/// characters rather than bytes keeps multi-byte paths intact.
fn strip_prefix_chars(path: &str, prefix: &str) -> String {
    path.chars().skip(prefix.chars().count()).collect()
}

/// Hex-encoded SHA-256 digest of a file's byte content.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}
