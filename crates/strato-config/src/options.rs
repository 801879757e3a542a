//! Resolved framework options.
//!
//! `StratoOptions` is the fully defaulted option tree handed to every build
//! target. Defaults are total: deserializing `{}` yields the same tree as
//! `StratoOptions::default()`.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::merge::merge_values;
use crate::webpack::{TranspilePattern, WebpackSection};

/// Deployment target of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Server-rendered deployment (default).
    #[default]
    Server,
    /// Fully pre-rendered static deployment.
    Static,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Server => "server",
            Target::Static => "static",
        }
    }
}

/// Application-level options affecting asset URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppOptions {
    /// Base URL the application is served from.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory (relative to `base_url`) where build assets are published.
    #[serde(default = "default_build_assets_dir")]
    pub build_assets_dir: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            build_assets_dir: default_build_assets_dir(),
        }
    }
}

/// Build-wide options outside the bundler section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSection {
    /// Dependency modules to run through the transpiler anyway.
    #[serde(default)]
    pub transpile: Vec<TranspilePattern>,

    /// Suppress non-error build output.
    #[serde(default)]
    pub quiet: bool,
}

/// Unstable feature toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperimentalOptions {
    /// Use the async entry module instead of the synchronous one.
    #[serde(default)]
    pub async_entry: bool,
}

/// Root of the resolved framework option tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StratoOptions {
    /// Development build flag; selects bundler mode and dev-only plugins.
    #[serde(default)]
    pub dev: bool,

    #[serde(default)]
    pub target: Target,

    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Directory holding the framework's app runtime (entry modules).
    #[serde(default = "default_app_dir")]
    pub app_dir: PathBuf,

    /// Directory for generated build artifacts.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Extra module search paths, appended after `node_modules`.
    #[serde(default)]
    pub modules_dir: Vec<PathBuf>,

    /// User import aliases, merged over the framework's reserved entries.
    #[serde(default)]
    pub alias: IndexMap<String, String>,

    /// Free-form environment map injected as global defines.
    #[serde(default)]
    pub env: IndexMap<String, Value>,

    #[serde(default)]
    pub app: AppOptions,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub webpack: WebpackSection,

    #[serde(default)]
    pub experimental: ExperimentalOptions,
}

impl Default for StratoOptions {
    fn default() -> Self {
        Self {
            dev: false,
            target: Target::default(),
            root_dir: default_root_dir(),
            app_dir: default_app_dir(),
            build_dir: default_build_dir(),
            modules_dir: Vec::new(),
            alias: IndexMap::new(),
            env: IndexMap::new(),
            app: AppOptions::default(),
            build: BuildSection::default(),
            webpack: WebpackSection::default(),
            experimental: ExperimentalOptions::default(),
        }
    }
}

impl StratoOptions {
    /// Create from a `serde_json::Value` (programmatic config).
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Convert to a `serde_json::Value`.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Apply an override fragment on top of these options, last write wins.
    ///
    /// The programmatic warning-ignore filters are not part of the value
    /// surface and are carried across the merge unchanged.
    pub fn with_overrides(self, fragment: &Value) -> Result<Self> {
        if fragment.is_null() {
            return Ok(self);
        }

        let filters = self.webpack.warning_ignore_filters.clone();
        let mut base = self.to_value()?;
        merge_values(&mut base, fragment);
        let mut merged: StratoOptions =
            serde_json::from_value(base).map_err(|e| ConfigError::InvalidOverride(e.to_string()))?;
        merged.webpack.warning_ignore_filters = filters;
        Ok(merged)
    }
}

fn default_base_url() -> String {
    "/".to_string()
}

fn default_build_assets_dir() -> String {
    "_strato/".to_string()
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_app_dir() -> PathBuf {
    PathBuf::from(".strato/app")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from(".strato")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_value_equals_defaults() {
        let from_empty = StratoOptions::from_value(json!({})).unwrap();
        let defaults = StratoOptions::default();
        assert_eq!(
            serde_json::to_value(&from_empty).unwrap(),
            serde_json::to_value(&defaults).unwrap()
        );
    }

    #[test]
    fn from_value_reads_nested_sections() {
        let options = StratoOptions::from_value(json!({
            "dev": true,
            "target": "static",
            "app": { "base_url": "/docs/" },
            "build": { "transpile": ["some-dep"] },
            "webpack": { "profile": true }
        }))
        .unwrap();

        assert!(options.dev);
        assert_eq!(options.target, Target::Static);
        assert_eq!(options.app.base_url, "/docs/");
        assert_eq!(options.build.transpile.len(), 1);
        assert!(options.webpack.profile);
    }

    #[test]
    fn with_overrides_wins_on_collision() {
        let options = StratoOptions::from_value(json!({ "dev": true }))
            .unwrap()
            .with_overrides(&json!({ "dev": false, "app": { "base_url": "/cdn/" } }))
            .unwrap();

        assert!(!options.dev);
        assert_eq!(options.app.base_url, "/cdn/");
        // untouched fields keep their defaults
        assert_eq!(options.app.build_assets_dir, "_strato/");
    }

    #[test]
    fn with_overrides_preserves_warning_filters() {
        use crate::webpack::BuildWarning;
        use std::sync::Arc;

        let mut options = StratoOptions::default();
        options
            .webpack
            .warning_ignore_filters
            .0
            .push(Arc::new(|warn: &BuildWarning| warn.name == "noise"));

        let merged = options
            .with_overrides(&json!({ "webpack": { "profile": true } }))
            .unwrap();

        assert!(merged.webpack.profile);
        assert_eq!(merged.webpack.warning_ignore_filters.0.len(), 1);
    }
}
