//! # Graft
//!
//! A post-build HTML asset injector. Graft takes the HTML template your
//! bundler or site generator produced and wires the built assets into it:
//! CSS and JS files become link/script tags (or inline bodies) inside
//! comment-delimited regions, conditional blocks are stripped, and the
//! current git commit can be stamped in for traceability.
//!
//! # Architecture: Resolve → Render → Rewrite
//!
//! One run flows left to right; every arrow is a plain function call:
//!
//! ```text
//! --css/--js pattern → resolve  → [files]     → tags → [fragments] ─┐
//! --hash             → revision → commit hash ──────────────────────┼→ inject
//! --remove           → condition token ─────────────────────────────┘    │
//!                                                        rewritten HTML ─┘→ output file
//! ```
//!
//! The rewrite itself is four global text substitutions over the buffered
//! document, in fixed order: js regions, css regions, git-hash markers,
//! matching remove regions. There is no HTML parsing and no DOM: markers
//! are literal comment text, which is what lets graft run on any template
//! language's output without understanding it.
//!
//! # Marker Grammar
//!
//! ```text
//! <!-- inject:css -->   ...   <!-- endinject -->
//! <!-- inject:js -->    ...   <!-- endinject -->
//! <!-- inject:git-hash -->
//! <!-- remove:development --> ... <!-- endremove -->
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolve`] | Pattern resolution: file, directory, or glob into an ordered file list |
//! | [`tags`] | Fragment rendering: link/script/style tags, inline bodies, etag suffixes |
//! | [`revision`] | Commit hash lookup via `git rev-parse HEAD` |
//! | [`inject`] | The four-stage marker rewrite over the document |
//! | [`config`] | Optional `graft.toml` providing defaults for every CLI flag |
//! | [`output`] | Run summary formatting: pure `format_*` plus stdout `print_*` |
//!
//! # Design Decisions
//!
//! ## Buffered Rewrite, Not Streaming
//!
//! The whole template is read into memory and rewritten with four
//! independent `replace_all` passes. Region markers can sit megabytes apart,
//! so a streaming rewrite would have to buffer until each end marker anyway;
//! templates are small and the buffered form keeps every stage a pure
//! `&str -> String` function that tests can hit directly.
//!
//! ## Markers Are Consumed, Not Preserved
//!
//! Injection replaces the whole region, markers included. That makes output
//! deterministic and grep-friendly, and it means injection is deliberately
//! not idempotent: a second run finds no markers and changes nothing. Keep
//! the un-injected template as the build input, not the injected output.
//!
//! ## Maud For Fragments
//!
//! Generated tags go through [Maud](https://maud.lambda.xyz/) rather than
//! string concatenation: malformed tag structure is a compile error, and
//! attribute values are escaped correctly without hand-rolled quoting.
//! Inline bodies are spliced through `PreEscaped`; asset content is
//! emitted verbatim by contract.
//!
//! ## Fatal-First Error Handling
//!
//! Every failure aborts the run: missing input, unresolvable pattern,
//! unreadable asset, failed git lookup. There are no fallbacks and no
//! partial recoveries, so a broken build never produces a silently
//! half-injected page. The one soft case is a glob that matches nothing:
//! that is an empty injection, not an error, and the marker region stays
//! untouched for a later run.

pub mod config;
pub mod inject;
pub mod output;
pub mod resolve;
pub mod revision;
pub mod tags;

#[cfg(test)]
pub(crate) mod test_helpers;
