//! Path, URL, and filename-template helpers used by the presets.

use once_cell::sync::Lazy;
use path_clean::clean;
use regex::Regex;
use std::path::Path;

use strato_config::TranspilePattern;

use crate::context::WebpackConfigContext;
use crate::{Error, Result};

/// Output artifact kinds with their own filename templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    App,
    Chunk,
    Css,
    Img,
    Font,
    Video,
}

static HASH_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(?:chunkhash|contenthash|hash)(?::\d+)?\]").unwrap());

/// Resolve the output filename template for an artifact.
///
/// User overrides win; otherwise development builds get stable names and
/// production builds get content-hashed ones. Hash tokens are stripped from
/// development templates because the dev server rewrites files in place.
pub fn file_name(ctx: &WebpackConfigContext, artifact: Artifact) -> String {
    let filenames = &ctx.options.webpack.filenames;
    let overridden = match artifact {
        Artifact::App => filenames.app.as_deref(),
        Artifact::Chunk => filenames.chunk.as_deref(),
        Artifact::Css => filenames.css.as_deref(),
        Artifact::Img => filenames.img.as_deref(),
        Artifact::Font => filenames.font.as_deref(),
        Artifact::Video => filenames.video.as_deref(),
    };
    let template = overridden
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| default_template(artifact, ctx.is_dev()).to_owned());

    if ctx.is_dev() && HASH_TOKEN.is_match(&template) {
        tracing::warn!(
            template = %template,
            "hash tokens are not supported in development filenames, stripping"
        );
        return HASH_TOKEN.replace_all(&template, "").into_owned();
    }
    template
}

fn default_template(artifact: Artifact, dev: bool) -> &'static str {
    match (artifact, dev) {
        (Artifact::App, true) | (Artifact::Chunk, true) => "[name].js",
        (Artifact::App, false) | (Artifact::Chunk, false) => "[contenthash:7].js",
        (Artifact::Css, true) => "[name].css",
        (Artifact::Css, false) => "css/[contenthash:7].css",
        (Artifact::Img, true) | (Artifact::Font, true) | (Artifact::Video, true) => {
            "[path][name].[ext]"
        }
        (Artifact::Img, false) => "img/[name].[contenthash:7].[ext]",
        (Artifact::Font, false) => "fonts/[name].[contenthash:7].[ext]",
        (Artifact::Video, false) => "videos/[name].[contenthash:7].[ext]",
    }
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if base.is_empty() {
        format!("/{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Lossy path-to-string conversion for config fields consumed as strings.
pub fn path_to_string(path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().into_owned()
}

/// Normalize a path and escape it into a literal regex source.
pub fn escaped_path_pattern(path: &str) -> String {
    regex::escape(&path_to_string(clean(path)))
}

/// Compile a transpile pattern into a matcher.
pub fn transpile_regex(pattern: &TranspilePattern) -> Result<Regex> {
    let source = match pattern {
        TranspilePattern::Exact(path) => escaped_path_pattern(path),
        TranspilePattern::Pattern { pattern } => pattern.clone(),
    };
    Regex::new(&source).map_err(|e| Error::InvalidConfig(e.to_string()))
}
