//! Shared build context and the ordered-preset mechanism.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use strato_config::{StratoOptions, TranspilePattern, merge_values};

use crate::config::WebpackConfig;
use crate::{Error, Result};

/// Build target variant. One context (and one bundler configuration) exists
/// per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleName {
    Client,
    Server,
    /// Modern-browser client build (ES modules, no legacy transforms).
    Modern,
}

impl BundleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleName::Client => "client",
            BundleName::Server => "server",
            BundleName::Modern => "modern",
        }
    }
}

impl fmt::Display for BundleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configuration concern applied to the shared context.
pub type Preset = fn(&mut WebpackConfigContext) -> Result<()>;

/// Apply presets in order. Later presets may overwrite fields set by
/// earlier ones.
pub fn apply_presets(ctx: &mut WebpackConfigContext, presets: &[Preset]) -> Result<()> {
    for preset in presets {
        preset(ctx)?;
    }
    Ok(())
}

/// Mutable aggregate threaded through every preset.
///
/// Created once per build target, mutated in place by each pipeline stage,
/// then handed off wholesale to the external bundler and discarded.
#[derive(Debug)]
pub struct WebpackConfigContext {
    pub options: Arc<StratoOptions>,
    pub name: BundleName,

    /// The partially built bundler configuration.
    pub config: WebpackConfig,

    /// Resolved import alias table.
    pub alias: IndexMap<String, String>,

    /// Modules to run through the transpiler despite being dependencies.
    pub transpile: Vec<TranspilePattern>,
}

impl WebpackConfigContext {
    pub fn new(options: Arc<StratoOptions>, name: BundleName) -> Self {
        Self {
            config: WebpackConfig::for_bundle(name.as_str()),
            options,
            name,
            alias: IndexMap::new(),
            transpile: Vec::new(),
        }
    }

    pub fn is_dev(&self) -> bool {
        self.options.dev
    }

    pub fn is_server(&self) -> bool {
        matches!(self.name, BundleName::Server)
    }

    pub fn is_client(&self) -> bool {
        !self.is_server()
    }

    /// Merge a raw configuration fragment over the assembled config,
    /// last write wins.
    ///
    /// Plugin descriptors carry non-serializable state (the composed warning
    /// predicate), so the current plugin list is carried across the value
    /// round trip unchanged unless the fragment replaces it outright.
    pub fn merge_config_fragment(&mut self, fragment: &Value) -> Result<()> {
        if fragment.is_null() {
            return Ok(());
        }

        let kept_plugins = if fragment.get("plugins").is_none() {
            Some(std::mem::take(&mut self.config.plugins))
        } else {
            None
        };

        let mut base =
            serde_json::to_value(&self.config).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        merge_values(&mut base, fragment);
        let mut merged: WebpackConfig =
            serde_json::from_value(base).map_err(|e| Error::InvalidConfig(e.to_string()))?;

        if let Some(plugins) = kept_plugins {
            merged.plugins = plugins;
        }
        self.config = merged;
        Ok(())
    }

    /// Hand the finished configuration off to the bundler.
    pub fn into_config(self) -> WebpackConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildPlugin;
    use serde_json::json;

    fn ctx() -> WebpackConfigContext {
        WebpackConfigContext::new(Arc::new(StratoOptions::default()), BundleName::Client)
    }

    #[test]
    fn presets_run_in_order() {
        fn first(ctx: &mut WebpackConfigContext) -> Result<()> {
            ctx.config.stats = "first".into();
            Ok(())
        }
        fn second(ctx: &mut WebpackConfigContext) -> Result<()> {
            ctx.config.stats = "second".into();
            Ok(())
        }

        let mut ctx = ctx();
        apply_presets(&mut ctx, &[first, second]).unwrap();
        assert_eq!(ctx.config.stats, "second");
    }

    #[test]
    fn fragment_merge_is_last_write_wins() {
        let mut ctx = ctx();
        ctx.config.stats = "none".into();
        ctx.merge_config_fragment(&json!({
            "stats": "detailed",
            "output": { "publicPath": "/cdn/" }
        }))
        .unwrap();

        assert_eq!(ctx.config.stats, "detailed");
        assert_eq!(ctx.config.output.public_path, "/cdn/");
    }

    #[test]
    fn fragment_merge_keeps_plugins_it_does_not_touch() {
        let mut ctx = ctx();
        ctx.config.plugins.push(BuildPlugin::TimeFix);
        ctx.merge_config_fragment(&json!({ "stats": "errors-only" }))
            .unwrap();

        assert_eq!(ctx.config.plugins.len(), 1);
        assert_eq!(ctx.config.plugins[0].name(), "time-fix");
    }

    #[test]
    fn fragment_can_replace_the_plugin_list() {
        let mut ctx = ctx();
        ctx.config.plugins.push(BuildPlugin::TimeFix);
        ctx.merge_config_fragment(&json!({
            "plugins": [{ "plugin": "user", "name": "copy-assets", "options": null }]
        }))
        .unwrap();

        assert_eq!(ctx.config.plugins.len(), 1);
        assert_eq!(ctx.config.plugins[0].name(), "copy-assets");
    }
}
