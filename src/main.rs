use clap::Parser;
use graft::{config, inject, output, resolve, revision, tags};
use std::path::{Path, PathBuf};
use std::process;

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup, lives for the whole process
        Box::leak(format!("{} ({hash})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "graft")]
#[command(about = "Post-build HTML asset injector")]
#[command(long_about = "\
Post-build HTML asset injector

Rewrites comment-delimited regions in an HTML template to reference (or
inline) built CSS/JS assets, deletes condition-marked blocks, and stamps
the current git commit.

Markers:

  <!-- inject:css -->  ... <!-- endinject -->       # link/style tags go here
  <!-- inject:js -->   ... <!-- endinject -->       # script tags go here
  <!-- inject:git-hash -->                          # becomes <!-- <commit> -->
  <!-- remove:development --> ... <!-- endremove -->  # deleted with -r development

Examples:

  graft -i dist/index.html -c dist/css -j dist/js -g dist/
  graft -i dist/index.html -c 'dist/**/*.css' -e
  graft -i src/index.html -o dist/index.html -I -c dist/css
  graft -i dist/index.html -r development -H

A pattern is a file, a directory (immediate *.css/*.js entries), or a
quoted glob. Options can also come from graft.toml in the working
directory; run 'graft --gen-config' to print a documented template.")]
#[command(version = version_string())]
struct Cli {
    /// HTML template to rewrite
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output path (defaults to the input: in-place rewrite)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// CSS pattern: file, directory, or quoted glob
    #[arg(short = 'c', long)]
    css: Option<String>,

    /// JS pattern: file, directory, or quoted glob
    #[arg(short = 'j', long)]
    js: Option<String>,

    /// Delete remove-regions whose condition equals this token
    #[arg(short = 'r', long)]
    remove: Option<String>,

    /// Leading characters sliced off emitted asset paths
    #[arg(short = 'g', long)]
    ignore: Option<String>,

    /// Stamp the current git commit into git-hash markers
    #[arg(short = 'H', long)]
    hash: bool,

    /// Append ?etag=<digest> cache-busters to emitted paths
    #[arg(short = 'e', long)]
    etag: bool,

    /// Embed file contents in <style>/<script> bodies instead of linking
    #[arg(short = 'I', long)]
    inline: bool,

    /// Emit async on script tags
    #[arg(short = 'A', long = "async")]
    script_async: bool,

    /// Emit defer on script tags (async wins when both are given)
    #[arg(short = 'D', long = "defer")]
    script_defer: bool,

    /// Print a stock graft.toml with all options documented
    #[arg(long)]
    gen_config: bool,
}

/// Effective options for one run: CLI flags over `graft.toml` values.
///
/// Scalar options take the CLI value when given, else the file value.
/// Boolean flags are OR-combined: a flag on the command line cannot un-set
/// a `true` from the file.
#[derive(Debug, Clone)]
struct Options {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    css: Option<String>,
    js: Option<String>,
    remove: Option<String>,
    hash: bool,
    render: tags::RenderOptions,
}

fn merge_options(cli: &Cli, file: &config::GraftConfig) -> Options {
    Options {
        input: cli
            .input
            .clone()
            .or_else(|| file.input.as_ref().map(PathBuf::from)),
        output: cli
            .output
            .clone()
            .or_else(|| file.output.as_ref().map(PathBuf::from)),
        css: cli.css.clone().or_else(|| file.assets.css.clone()),
        js: cli.js.clone().or_else(|| file.assets.js.clone()),
        remove: cli.remove.clone().or_else(|| file.remove.clone()),
        hash: cli.hash || file.hash,
        render: tags::RenderOptions {
            inline: cli.inline || file.render.inline,
            ignore_prefix: cli.ignore.clone().or_else(|| file.render.ignore.clone()),
            etag: cli.etag || file.render.etag,
            script_async: cli.script_async || file.render.script_async,
            script_defer: cli.script_defer || file.render.script_defer,
        },
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("graft: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let file_config = config::load_config(Path::new("."))?;
    let options = merge_options(&cli, &file_config);

    let Some(input) = options.input.clone() else {
        return Err("missing required option: --input".into());
    };
    let meta = std::fs::metadata(&input)
        .map_err(|_| format!("input file not found: {}", input.display()))?;
    if !meta.is_file() {
        return Err(format!("input is not a regular file: {}", input.display()).into());
    }
    let output_path = options.output.clone().unwrap_or_else(|| input.clone());

    println!("==> Injecting {}", input.display());

    let css_files = resolve_assets(options.css.as_deref(), tags::AssetKind::Css)?;
    let js_files = resolve_assets(options.js.as_deref(), tags::AssetKind::Js)?;

    let css_fragments = tags::generate_tags(&css_files, tags::AssetKind::Css, &options.render)?;
    let js_fragments = tags::generate_tags(&js_files, tags::AssetKind::Js, &options.render)?;

    let revision = if options.hash {
        Some(revision::read_revision()?)
    } else {
        None
    };

    let condition: Option<String> = options
        .remove
        .as_deref()
        .map(|arg| inject::condition_token(arg).to_string());

    let html = std::fs::read_to_string(&input)?;
    let transformed = inject::transform(
        &html,
        &js_fragments,
        &css_fragments,
        revision.as_deref().unwrap_or_default(),
        condition.as_deref().unwrap_or_default(),
    )?;
    std::fs::write(&output_path, &transformed.html)?;

    let report = output::RunReport {
        input,
        output: output_path,
        css_files: css_files.len(),
        js_files: js_files.len(),
        revision,
        remove_condition: condition,
        stats: transformed.stats,
    };
    output::print_run_output(&report);

    Ok(())
}

/// Resolve an optional asset pattern; no pattern means no files.
fn resolve_assets(
    pattern: Option<&str>,
    kind: tags::AssetKind,
) -> Result<Vec<PathBuf>, resolve::ResolveError> {
    match pattern {
        Some(p) => resolve::resolve(p, kind.extension()),
        None => Ok(Vec::new()),
    }
}
