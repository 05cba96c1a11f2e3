//! CLI output formatting for injection runs.
//!
//! One run produces a short stdout report: which assets were matched, which
//! regions were rewritten, where the result went.
//!
//! ```text
//! css: 2 files → 1 regions
//! js: 1 files → 1 regions
//! git-hash: 4f2a91c09be1... → 1 markers
//! removed: 1 regions (development)
//! wrote dist/index.html (in place)
//! ```
//!
//! Lines only appear for features the run actually used; a bare run prints
//! just the `wrote` line.
//!
//! # Architecture
//!
//! `format_run_output` is pure (returns `Vec<String>`, no I/O) for
//! testability; `print_run_output` is the stdout wrapper.

use crate::inject::InjectStats;
use std::path::PathBuf;

/// Everything the summary needs to know about a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub css_files: usize,
    pub js_files: usize,
    pub revision: Option<String>,
    pub remove_condition: Option<String>,
    pub stats: InjectStats,
}

/// Format the run summary.
pub fn format_run_output(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();

    if report.css_files > 0 || report.stats.css_regions > 0 {
        lines.push(format!(
            "css: {} files \u{2192} {} regions",
            report.css_files, report.stats.css_regions
        ));
    }
    if report.js_files > 0 || report.stats.js_regions > 0 {
        lines.push(format!(
            "js: {} files \u{2192} {} regions",
            report.js_files, report.stats.js_regions
        ));
    }
    if let Some(revision) = &report.revision {
        lines.push(format!(
            "git-hash: {} \u{2192} {} markers",
            revision, report.stats.hash_markers
        ));
    }
    if let Some(condition) = &report.remove_condition {
        lines.push(format!(
            "removed: {} regions ({})",
            report.stats.removed_regions, condition
        ));
    }

    if report.output == report.input {
        lines.push(format!("wrote {} (in place)", report.output.display()));
    } else {
        lines.push(format!("wrote {}", report.output.display()));
    }

    lines
}

/// Print the run summary to stdout.
pub fn print_run_output(report: &RunReport) {
    for line in format_run_output(report) {
        println!("{}", line);
    }
}
