//! Project configuration module.
//!
//! Handles loading and validating `graft.toml`. The file is optional: when
//! the working directory has none, every option comes from the command
//! line. When present, each key provides the default for the matching CLI
//! flag, and flags given on the command line win.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All keys are optional - they mirror the CLI flags
//!
//! input = "dist/index.html"   # Template to rewrite (-i)
//! output = "dist/index.html"  # Defaults to input: in-place rewrite (-o)
//! hash = false                # Stamp git commit into git-hash markers (-H)
//! remove = "development"      # Condition for remove regions (-r)
//!
//! [assets]
//! css = "dist/css"            # File, directory, or quoted glob (-c)
//! js = "dist/js"              # File, directory, or quoted glob (-j)
//!
//! [render]
//! ignore = "dist/"            # Prefix sliced off emitted paths (-g)
//! etag = false                # Append ?etag=<digest> cache-busters (-e)
//! inline = false              # Embed file contents (-I)
//! async = false               # Script attribute (-A)
//! defer = false               # Script attribute, loses to async (-D)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: set just the keys you want. Unknown keys are
//! rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "graft.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `graft.toml`.
///
/// Every field is a default for one CLI flag. Absent keys mean "not
/// configured"; boolean keys default to off.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraftConfig {
    /// Template to rewrite.
    pub input: Option<String>,
    /// Output path; absent means rewrite the input in place.
    pub output: Option<String>,
    /// Stamp the current git commit into git-hash markers.
    pub hash: bool,
    /// Condition for remove regions.
    pub remove: Option<String>,
    /// Asset patterns per kind.
    pub assets: AssetsConfig,
    /// Tag rendering options.
    pub render: RenderConfig,
}

/// Asset patterns (file, directory, or quoted glob).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub css: Option<String>,
    pub js: Option<String>,
}

/// Tag rendering options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Leading characters sliced off emitted asset paths.
    pub ignore: Option<String>,
    /// Append `?etag=<digest>` cache-busters to emitted paths.
    pub etag: bool,
    /// Embed file contents instead of referencing paths.
    pub inline: bool,
    /// Emit `async` on script tags.
    #[serde(rename = "async")]
    pub script_async: bool,
    /// Emit `defer` on script tags. Loses to `async`.
    #[serde(rename = "defer")]
    pub script_defer: bool,
}

impl GraftConfig {
    /// Validate config values.
    ///
    /// Empty pattern strings are always mistakes (they would resolve the
    /// current directory or nothing at all) and are rejected here rather
    /// than surfacing as confusing resolution errors later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.as_deref() == Some("") {
            return Err(ConfigError::Validation("input must not be empty".into()));
        }
        if self.assets.css.as_deref() == Some("") {
            return Err(ConfigError::Validation(
                "assets.css must not be empty".into(),
            ));
        }
        if self.assets.js.as_deref() == Some("") {
            return Err(ConfigError::Validation(
                "assets.js must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load `graft.toml` from `dir`, or defaults when the file is absent.
pub fn load_config(dir: &Path) -> Result<GraftConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(GraftConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: GraftConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `graft.toml` with all keys explained.
///
/// Used by the `--gen-config` CLI flag.
pub fn stock_config_toml() -> &'static str {
    r##"# Graft Configuration
# ===================
# Project defaults for graft. Place this file as `graft.toml` in the
# directory graft runs from. Every key is optional and mirrors one CLI
# flag; flags given on the command line win over file values.
# Unknown keys will cause an error.

# HTML template to rewrite (-i/--input)
# input = "dist/index.html"

# Where to write the result; omit to rewrite the input in place (-o/--output)
# output = "build/index.html"

# Stamp the current git commit into git-hash markers (-H/--hash)
hash = false

# Delete remove-regions whose condition equals this token (-r/--remove)
# remove = "development"

# ---------------------------------------------------------------------------
# Asset patterns
# ---------------------------------------------------------------------------
[assets]
# File, directory, or quoted glob per asset kind (-c/--css, -j/--js)
# css = "dist/css"
# js = "dist/js"

# ---------------------------------------------------------------------------
# Tag rendering
# ---------------------------------------------------------------------------
[render]
# Leading characters sliced off emitted asset paths (-g/--ignore)
# ignore = "dist/"

# Append ?etag=<digest> cache-busters to emitted paths (-e/--etag)
etag = false

# Embed file contents in <style>/<script> bodies instead of linking (-I/--inline)
inline = false

# Script tag attribute; async wins when both are set (-A/--async, -D/--defer)
async = false
defer = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use tempfile::TempDir;

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn empty_config_parses_to_defaults() {
        let config: GraftConfig = toml::from_str("").unwrap();
        assert!(config.input.is_none());
        assert!(config.output.is_none());
        assert!(!config.hash);
        assert!(config.remove.is_none());
        assert!(config.assets.css.is_none());
        assert!(config.assets.js.is_none());
        assert!(config.render.ignore.is_none());
        assert!(!config.render.etag);
        assert!(!config.render.inline);
        assert!(!config.render.script_async);
        assert!(!config.render.script_defer);
    }

    #[test]
    fn partial_config_sets_only_named_fields() {
        let config: GraftConfig = toml::from_str(
            r#"
            [assets]
            css = "dist/css"
            "#,
        )
        .unwrap();
        assert_eq!(config.assets.css.as_deref(), Some("dist/css"));
        assert!(config.assets.js.is_none());
        assert!(config.input.is_none());
    }

    #[test]
    fn async_and_defer_keys_map_to_script_fields() {
        let config: GraftConfig = toml::from_str(
            r#"
            [render]
            async = true
            defer = true
            "#,
        )
        .unwrap();
        assert!(config.render.script_async);
        assert!(config.render.script_defer);
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let result: Result<GraftConfig, _> = toml::from_str("inptu = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_table_key_is_rejected() {
        let result: Result<GraftConfig, _> = toml::from_str(
            r#"
            [render]
            asink = true
            "#,
        );
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn empty_pattern_strings_fail_validation() {
        let config: GraftConfig = toml::from_str("[assets]\ncss = \"\"").unwrap();
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn default_config_is_valid() {
        GraftConfig::default().validate().unwrap();
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert!(config.input.is_none());
        assert!(!config.hash);
    }

    #[test]
    fn file_values_are_loaded() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            CONFIG_FILENAME,
            "input = \"dist/index.html\"\nhash = true\n",
        );

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.input.as_deref(), Some("dist/index.html"));
        assert!(config.hash);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), CONFIG_FILENAME, "input = [broken");

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn invalid_values_fail_at_load_time() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), CONFIG_FILENAME, "[assets]\njs = \"\"\n");

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_config_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_roundtrips_to_defaults() {
        let config: GraftConfig = toml::from_str(stock_config_toml()).unwrap();
        assert!(config.input.is_none());
        assert!(config.output.is_none());
        assert!(!config.hash);
        assert!(config.remove.is_none());
        assert!(config.assets.css.is_none());
        assert!(!config.render.etag);
        assert!(!config.render.inline);
        assert!(!config.render.script_async);
        assert!(!config.render.script_defer);
    }

    #[test]
    fn stock_config_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[assets]"));
        assert!(content.contains("[render]"));
    }

    #[test]
    fn stock_config_documents_every_flag() {
        let content = stock_config_toml();
        for flag in [
            "--input", "--output", "--css", "--js", "--remove", "--ignore", "--hash", "--etag",
            "--inline", "--async", "--defer",
        ] {
            assert!(content.contains(flag), "stock config must mention {flag}");
        }
    }
}
