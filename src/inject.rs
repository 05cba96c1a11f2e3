//! The marker-rewrite pipeline.
//!
//! Four substitutions over the whole document, applied in fixed order:
//!
//! | Stage | Marker | Replacement |
//! |-------|--------|-------------|
//! | 1 | `<!-- inject:js -->` … `<!-- endinject -->` | joined js fragments |
//! | 2 | `<!-- inject:css -->` … `<!-- endinject -->` | joined css fragments |
//! | 3 | `<!-- inject:git-hash -->` | `<!-- <revision> -->` |
//! | 4 | `<!-- remove:<cond> -->` … `<!-- endremove -->` | nothing |
//!
//! Every stage is a global substitution over the full document, so a
//! template may hold any number of regions of each kind and all are
//! processed alike. Region patterns are non-greedy with `.` matching
//! newlines, so adjacent regions never merge into one match.
//!
//! Stages 1 and 2 skip the document entirely when no fragments were
//! generated, leaving the markers in place for a later run. Stage 3 always
//! runs; without a revision it writes the empty-hash comment. Stage 4 only
//! touches regions whose condition equals the run's condition token;
//! injection runs first so removal sees the final document and needs no
//! special casing of injected content.
//!
//! The rewrite is pure and single-pass per stage. Substituted output is
//! never re-scanned, which also means a second run over already-injected
//! output finds no inject markers and changes nothing.

use regex::{NoExpand, Regex};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InjectError {
    #[error("marker pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

const JS_MARKER: &str = "<!-- inject:js -->";
const CSS_MARKER: &str = "<!-- inject:css -->";
const HASH_MARKER: &str = "<!-- inject:git-hash -->";
const END_INJECT: &str = "<!-- endinject -->";
const END_REMOVE: &str = "<!-- endremove -->";

/// Per-stage rewrite counts for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectStats {
    pub js_regions: usize,
    pub css_regions: usize,
    pub hash_markers: usize,
    pub removed_regions: usize,
}

impl InjectStats {
    pub fn total(&self) -> usize {
        self.js_regions + self.css_regions + self.hash_markers + self.removed_regions
    }
}

impl fmt::Display for InjectStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} injected, {} stamped, {} removed",
            self.js_regions + self.css_regions,
            self.hash_markers,
            self.removed_regions
        )
    }
}

/// Pipeline result: the rewritten document plus per-stage counts.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub html: String,
    pub stats: InjectStats,
}

/// Run the four-stage rewrite over `html`.
///
/// `revision` is the hash for stage 3 (empty when none was requested);
/// `remove_condition` is the already-extracted condition token for stage 4
/// (empty when `--remove` was not supplied, matching `<!-- remove: -->`
/// regions and nothing else).
pub fn transform(
    html: &str,
    js_fragments: &[String],
    css_fragments: &[String],
    revision: &str,
    remove_condition: &str,
) -> Result<Transformed, InjectError> {
    let mut stats = InjectStats::default();

    let mut html = inject_region(html, JS_MARKER, js_fragments, &mut stats.js_regions)?;
    html = inject_region(&html, CSS_MARKER, css_fragments, &mut stats.css_regions)?;

    stats.hash_markers = html.matches(HASH_MARKER).count();
    html = html.replace(HASH_MARKER, &format!("<!-- {revision} -->"));

    let re = region(&format!("<!-- remove:{remove_condition} -->"), END_REMOVE)?;
    stats.removed_regions = re.find_iter(&html).count();
    html = re.replace_all(&html, "").into_owned();

    Ok(Transformed { html, stats })
}

/// Replace every `marker` … `endinject` region with the joined fragments.
///
/// No fragments means no rewrite at all: the markers stay byte-for-byte.
fn inject_region(
    html: &str,
    marker: &str,
    fragments: &[String],
    count: &mut usize,
) -> Result<String, InjectError> {
    if fragments.is_empty() {
        return Ok(html.to_string());
    }

    let re = region(marker, END_INJECT)?;
    *count = re.find_iter(html).count();

    let joined = fragments.join("\n");
    // NoExpand keeps `$` sequences inside fragments literal.
    Ok(re.replace_all(html, NoExpand(&joined)).into_owned())
}

/// Whole-region pattern: start marker through the nearest end marker,
/// newlines included.
fn region(start: &str, end: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "(?s){}.*?{}",
        regex::escape(start),
        regex::escape(end)
    ))
}

/// Last colon-separated token of a `--remove` argument.
///
/// `remove:development` and `development` both select `development`; a
/// trailing colon selects the empty condition.
pub fn condition_token(arg: &str) -> &str {
    arg.rsplit(':').next().unwrap_or_default()
}
