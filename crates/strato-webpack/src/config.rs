//! Typed model of the configuration object handed to the external bundler.
//!
//! The serialized shape (camelCase keys, `mode` strings, `cache: false`)
//! matches what the bundler consumes; everything here is data, no behavior.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use strato_config::PluginSpec;

use crate::plugins::progress::{FriendlyErrorsOptions, ProgressOptions};
use crate::plugins::warning_ignore::WarningIgnorePlugin;

/// Bundler mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

/// Bundler cache setting. Production builds always disable the cache;
/// development builds leave the choice to the bundler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum CacheOption {
    Disabled,
    Default,
}

impl From<bool> for CacheOption {
    fn from(enabled: bool) -> Self {
        if enabled {
            CacheOption::Default
        } else {
            CacheOption::Disabled
        }
    }
}

impl From<CacheOption> for bool {
    fn from(cache: CacheOption) -> bool {
        matches!(cache, CacheOption::Default)
    }
}

/// Global defines injected into every module: identifier to replacement.
///
/// String values are code snippets (already JSON-quoted where needed);
/// booleans and numbers are substituted verbatim.
pub type DefineMap = IndexMap<String, Value>;

/// One entry of the ordered plugin list. List order is bundler execution
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum BuildPlugin {
    /// Watch-mode timestamp fix, attached in development only.
    TimeFix,
    /// User-supplied plugin descriptor, forwarded untouched.
    User(PluginSpec),
    /// Warning suppression with the composed ignore predicate.
    WarningIgnore(WarningIgnorePlugin),
    /// Environment injection via global defines.
    Define { defines: DefineMap },
    /// Error reformatting through the friendly-errors reporter.
    FriendlyErrors(FriendlyErrorsOptions),
    /// Build progress reporting.
    Progress(ProgressOptions),
}

impl BuildPlugin {
    /// Stable identifier of the plugin slot.
    pub fn name(&self) -> &str {
        match self {
            BuildPlugin::TimeFix => "time-fix",
            BuildPlugin::User(spec) => &spec.name,
            BuildPlugin::WarningIgnore(_) => "warning-ignore",
            BuildPlugin::Define { .. } => "define",
            BuildPlugin::FriendlyErrors(_) => "friendly-errors",
            BuildPlugin::Progress(_) => "progress",
        }
    }
}

/// `module` block: loader rules, filled by downstream presets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default)]
    pub rules: Vec<Value>,
}

/// `resolve` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveConfig {
    pub extensions: Vec<String>,
    pub alias: IndexMap<String, String>,
    pub modules: Vec<String>,
    pub fully_specified: bool,
}

/// `resolveLoader` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveLoaderConfig {
    pub modules: Vec<String>,
}

/// `output` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub path: PathBuf,
    pub filename: String,
    pub chunk_filename: String,
    pub public_path: String,
}

/// The configuration object handed wholesale to the external bundler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpackConfig {
    pub name: String,

    /// Entry name to entry module list.
    pub entry: IndexMap<String, Vec<String>>,

    pub module: ModuleConfig,

    /// Ordered plugin list.
    pub plugins: Vec<BuildPlugin>,

    pub externals: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve: Option<ResolveConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_loader: Option<ResolveLoaderConfig>,

    pub output: OutputConfig,

    /// Free-form optimization block, seeded from user options.
    pub optimization: Value,

    pub experiments: Value,

    pub mode: Mode,

    pub cache: CacheOption,

    pub stats: String,
}

impl WebpackConfig {
    /// Empty configuration for a named build target. Presets fill it in.
    pub fn for_bundle(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entry: IndexMap::new(),
            module: ModuleConfig::default(),
            plugins: Vec::new(),
            externals: Vec::new(),
            resolve: None,
            resolve_loader: None,
            output: OutputConfig::default(),
            optimization: Value::Null,
            experiments: Value::Null,
            mode: Mode::Development,
            cache: CacheOption::Default,
            stats: "none".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cache_option_serializes_as_bool() {
        assert_eq!(
            serde_json::to_value(CacheOption::Disabled).unwrap(),
            json!(false)
        );
        assert_eq!(
            serde_json::to_value(CacheOption::Default).unwrap(),
            json!(true)
        );
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Mode::Production).unwrap(),
            json!("production")
        );
    }

    #[test]
    fn config_uses_camel_case_keys() {
        let mut config = WebpackConfig::for_bundle("client");
        config.resolve_loader = Some(ResolveLoaderConfig {
            modules: vec!["node_modules".into()],
        });
        config.output.public_path = "/_strato/".into();

        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("resolveLoader").is_some());
        assert_eq!(value["output"]["publicPath"], json!("/_strato/"));
        assert!(value["output"].get("chunkFilename").is_some());
    }

    #[test]
    fn plugin_names_are_stable() {
        let plugin = BuildPlugin::Define {
            defines: DefineMap::new(),
        };
        assert_eq!(plugin.name(), "define");

        let user = BuildPlugin::User(PluginSpec {
            name: "copy-assets".into(),
            options: Value::Null,
        });
        assert_eq!(user.name(), "copy-assets");
    }
}
