//! User-facing webpack section of the framework options.
//!
//! Everything here is a declarative knob consumed by the `strato-webpack`
//! preset pipeline. The only non-serde member is the warning-ignore predicate
//! list, which is provided programmatically by modules.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A bundler warning as surfaced to ignore predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildWarning {
    /// Warning class name, e.g. `ModuleDependencyWarning`.
    pub name: String,
    /// Human-readable warning message.
    pub message: String,
}

/// Predicate deciding whether a warning should be ignored.
///
/// Returns `true` when the warning should be suppressed.
pub type WarningFilter = Arc<dyn Fn(&BuildWarning) -> bool + Send + Sync>;

/// Programmatic warning-ignore predicates. Skipped by serde; module authors
/// push filters onto the options before the config pipeline runs.
#[derive(Clone, Default)]
pub struct WarningFilters(pub Vec<WarningFilter>);

impl fmt::Debug for WarningFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WarningFilters").field(&self.0.len()).finish()
    }
}

/// A user-supplied bundler plugin: a name plus free-form options forwarded
/// to the plugin untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,

    #[serde(default)]
    pub options: Value,
}

/// A dependency module that must be transpiled despite living outside the
/// application source tree.
///
/// A bare string is an exact path prefix (normalized and regex-escaped at
/// use site); `{ pattern = ".." }` is a raw regex source kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranspilePattern {
    Exact(String),
    Pattern { pattern: String },
}

impl TranspilePattern {
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    pub fn pattern(source: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: source.into(),
        }
    }
}

/// Per-artifact output filename template overrides.
///
/// Unset fields fall back to the framework defaults (`[name].js` in
/// development, content-hashed in production).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileNameTemplates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

/// The `webpack` section of [`StratoOptions`](crate::StratoOptions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebpackSection {
    /// Extra plugins appended after the framework's own, in order.
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,

    /// Raw fragment merged under the config's `optimization` key.
    #[serde(default)]
    pub optimization: Value,

    /// Output filename template overrides.
    #[serde(default)]
    pub filenames: FileNameTemplates,

    /// Reformat bundler errors through the friendly-errors plugin.
    #[serde(default = "default_true")]
    pub friendly_errors: bool,

    /// Attach the progress-reporting plugin.
    #[serde(default)]
    pub profile: bool,

    /// Define `typeof process/window/document` so the minifier can drop
    /// whole environment-guarded branches.
    #[serde(default)]
    pub aggressive_code_removal: bool,

    /// Raw fragment merged over the assembled configuration, after all
    /// presets ran. Last write wins.
    #[serde(default)]
    pub config: Value,

    /// Programmatic warning-ignore predicates, composed with the built-in
    /// filter. Not part of the serialized config surface.
    #[serde(skip)]
    pub warning_ignore_filters: WarningFilters,
}

impl Default for WebpackSection {
    fn default() -> Self {
        Self {
            plugins: Vec::new(),
            optimization: Value::Null,
            filenames: FileNameTemplates::default(),
            friendly_errors: true,
            profile: false,
            aggressive_code_removal: false,
            config: Value::Null,
            warning_ignore_filters: WarningFilters::default(),
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transpile_pattern_accepts_bare_strings() {
        let patterns: Vec<TranspilePattern> =
            serde_json::from_value(json!(["some-dep", { "pattern": "dep/src" }])).unwrap();
        assert_eq!(
            patterns,
            vec![
                TranspilePattern::exact("some-dep"),
                TranspilePattern::pattern("dep/src"),
            ]
        );
    }

    #[test]
    fn webpack_section_defaults() {
        let section: WebpackSection = serde_json::from_value(json!({})).unwrap();
        assert!(section.friendly_errors);
        assert!(!section.profile);
        assert!(section.plugins.is_empty());
        assert!(section.config.is_null());
    }

    #[test]
    fn warning_filters_survive_clone() {
        let mut section = WebpackSection::default();
        section
            .warning_ignore_filters
            .0
            .push(Arc::new(|warn| warn.name == "noise"));
        let cloned = section.clone();
        let warn = BuildWarning {
            name: "noise".into(),
            message: String::new(),
        };
        assert!(cloned.warning_ignore_filters.0[0](&warn));
    }
}
