//! The base preset: everything shared by all build targets.
//!
//! Five concern presets run in order over the shared context, then the
//! user's raw config fragment is merged last so it wins on any collision.

use indexmap::IndexMap;
use serde_json::{Value, json};

use strato_config::{Target, TranspilePattern};

use crate::config::{
    BuildPlugin, CacheOption, DefineMap, Mode, ModuleConfig, OutputConfig, ResolveConfig,
    ResolveLoaderConfig, WebpackConfig,
};
use crate::context::{BundleName, WebpackConfigContext, apply_presets};
use crate::plugins::progress::{FriendlyErrorsOptions, ProgressOptions};
use crate::plugins::warning_ignore::{WarningIgnorePlugin, warning_ignore_filter};
use crate::utils::{Artifact, escaped_path_pattern, file_name, join_url, path_to_string};
use crate::Result;

/// Assemble the shared part of the bundler configuration.
pub fn base(ctx: &mut WebpackConfigContext) -> Result<()> {
    apply_presets(
        ctx,
        &[
            base_alias,
            base_config,
            base_plugins,
            base_resolve,
            base_transpile,
            user_config,
        ],
    )
}

fn base_alias(ctx: &mut WebpackConfigContext) -> Result<()> {
    let options = ctx.options.clone();

    let plugins_dir = options
        .build_dir
        .join("plugins")
        .join(if ctx.is_client() { "client" } else { "server" });

    let mut alias = IndexMap::new();
    alias.insert("#app".to_string(), path_to_string(&options.app_dir));
    alias.insert("#build/plugins".to_string(), path_to_string(plugins_dir));
    alias.insert("#build".to_string(), path_to_string(&options.build_dir));
    // user aliases override the reserved entries,
    // entries already on the context override both
    alias.extend(options.alias.iter().map(|(k, v)| (k.clone(), v.clone())));
    alias.extend(ctx.alias.drain(..));

    if ctx.is_client() {
        alias.insert(
            "#internal/server".to_string(),
            path_to_string(options.build_dir.join("server.client.mjs")),
        );
    }

    ctx.alias = alias;
    Ok(())
}

fn base_config(ctx: &mut WebpackConfigContext) -> Result<()> {
    let options = ctx.options.clone();

    let entry_module = if options.experimental.async_entry {
        "entry.async"
    } else {
        "entry"
    };
    let mut entry = IndexMap::new();
    entry.insert(
        "app".to_string(),
        vec![path_to_string(options.app_dir.join(entry_module))],
    );

    let skeleton = WebpackConfig {
        name: ctx.name.to_string(),
        entry,
        module: ModuleConfig::default(),
        plugins: Vec::new(),
        externals: Vec::new(),
        resolve: None,
        resolve_loader: None,
        optimization: optimization(&options.webpack.optimization),
        experiments: json!({}),
        mode: if ctx.is_dev() {
            Mode::Development
        } else {
            Mode::Production
        },
        cache: cache_option(ctx),
        output: output_config(ctx),
        stats: "none".to_string(),
    };

    // fields an earlier preset already set win over the skeleton
    let seeded = std::mem::replace(&mut ctx.config, skeleton);
    let config = &mut ctx.config;
    if !seeded.entry.is_empty() {
        config.entry = seeded.entry;
    }
    if !seeded.module.rules.is_empty() {
        config.module = seeded.module;
    }
    if !seeded.plugins.is_empty() {
        config.plugins = seeded.plugins;
    }
    if !seeded.externals.is_empty() {
        config.externals = seeded.externals;
    }
    if seeded.resolve.is_some() {
        config.resolve = seeded.resolve;
    }
    if seeded.resolve_loader.is_some() {
        config.resolve_loader = seeded.resolve_loader;
    }
    Ok(())
}

fn base_plugins(ctx: &mut WebpackConfigContext) -> Result<()> {
    let options = ctx.options.clone();

    // Watch-mode timestamp fix goes before everything else
    if options.dev {
        ctx.config.plugins.push(BuildPlugin::TimeFix);
    }

    // User plugins
    for spec in &options.webpack.plugins {
        ctx.config.plugins.push(BuildPlugin::User(spec.clone()));
    }

    // Ignore empty warnings
    ctx.config
        .plugins
        .push(BuildPlugin::WarningIgnore(WarningIgnorePlugin::new(
            warning_ignore_filter(&options),
        )));

    // Provide env via global defines
    ctx.config.plugins.push(BuildPlugin::Define {
        defines: define_env(ctx),
    });

    // Friendly errors
    if ctx.is_server()
        || (ctx.is_dev() && !options.build.quiet && options.webpack.friendly_errors)
    {
        ctx.config
            .plugins
            .push(BuildPlugin::FriendlyErrors(FriendlyErrorsOptions::default()));
    }

    if options.webpack.profile {
        let color = match ctx.name {
            BundleName::Client => "green",
            BundleName::Server => "orange",
            BundleName::Modern => "blue",
        };
        ctx.config.plugins.push(BuildPlugin::Progress(ProgressOptions {
            name: ctx.name.to_string(),
            color: color.to_string(),
            reporters: vec!["stats".to_string()],
            stats: !ctx.is_dev(),
        }));
    }

    Ok(())
}

fn base_resolve(ctx: &mut WebpackConfigContext) -> Result<()> {
    let options = ctx.options.clone();

    // Prioritize nested node_modules in the bundler search path
    let mut modules_dir = vec!["node_modules".to_string()];
    modules_dir.extend(options.modules_dir.iter().map(path_to_string));

    // keep blocks an earlier preset already set
    if ctx.config.resolve.is_none() {
        ctx.config.resolve = Some(ResolveConfig {
            extensions: [".wasm", ".mjs", ".js", ".ts", ".json", ".vue", ".jsx", ".tsx"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            alias: ctx.alias.clone(),
            modules: modules_dir.clone(),
            fully_specified: false,
        });
    }

    if ctx.config.resolve_loader.is_none() {
        ctx.config.resolve_loader = Some(ResolveLoaderConfig {
            modules: modules_dir,
        });
    }

    Ok(())
}

pub fn base_transpile(ctx: &mut WebpackConfigContext) -> Result<()> {
    let options = ctx.options.clone();

    let mut transpile = vec![
        // include SFC build artifacts shipped inside node_modules
        TranspilePattern::pattern(r"(?i)\.vue\.js"),
        TranspilePattern::pattern("consola/src"),
        TranspilePattern::pattern("vue-demi"),
    ];

    for pattern in &options.build.transpile {
        match pattern {
            TranspilePattern::Exact(path) => {
                transpile.push(TranspilePattern::pattern(escaped_path_pattern(path)));
            }
            raw @ TranspilePattern::Pattern { .. } => transpile.push(raw.clone()),
        }
    }

    transpile.extend(ctx.transpile.drain(..));
    ctx.transpile = transpile;
    Ok(())
}

/// Merge the user's raw config fragment last so it overrides every preset.
fn user_config(ctx: &mut WebpackConfigContext) -> Result<()> {
    let fragment = ctx.options.webpack.config.clone();
    ctx.merge_config_fragment(&fragment)
}

fn optimization(user: &Value) -> Value {
    let mut optimization = if user.is_object() {
        user.clone()
    } else {
        json!({})
    };
    if let Some(map) = optimization.as_object_mut() {
        map.insert("minimizer".to_string(), json!([]));
    }
    optimization
}

fn cache_option(ctx: &WebpackConfigContext) -> CacheOption {
    if ctx.is_dev() {
        CacheOption::Default
    } else {
        CacheOption::Disabled
    }
}

fn output_config(ctx: &WebpackConfigContext) -> OutputConfig {
    let options = &ctx.options;

    OutputConfig {
        path: options
            .build_dir
            .join("dist")
            .join(if ctx.is_server() { "server" } else { "client" }),
        filename: file_name(ctx, Artifact::App),
        chunk_filename: file_name(ctx, Artifact::Chunk),
        public_path: join_url(&options.app.base_url, &options.app.build_assets_dir),
    }
}

/// Build the global define map injected into every module.
///
/// Boolean and number values pass through verbatim; everything else becomes
/// a JSON-serialized code snippet.
pub fn define_env(ctx: &WebpackConfigContext) -> DefineMap {
    let options = &ctx.options;
    let mode = ctx.config.mode.as_str();

    let mut env = DefineMap::new();
    env.insert("process.env.NODE_ENV".to_string(), json_quoted(mode));
    env.insert("process.mode".to_string(), json_quoted(mode));
    env.insert("process.dev".to_string(), json!(options.dev));
    env.insert(
        "process.static".to_string(),
        json!(options.target == Target::Static),
    );
    env.insert(
        "process.target".to_string(),
        json_quoted(options.target.as_str()),
    );
    env.insert(
        "process.env.VUE_ENV".to_string(),
        json_quoted(ctx.name.as_str()),
    );
    env.insert("process.browser".to_string(), json!(ctx.is_client()));
    env.insert("process.client".to_string(), json!(ctx.is_client()));
    env.insert("process.server".to_string(), json!(ctx.is_server()));

    if options.webpack.aggressive_code_removal {
        let (process_side, dom_side) = if ctx.is_server() {
            ("object", "undefined")
        } else {
            ("undefined", "object")
        };
        env.insert("typeof process".to_string(), json_quoted(process_side));
        env.insert("typeof window".to_string(), json_quoted(dom_side));
        env.insert("typeof document".to_string(), json_quoted(dom_side));
    }

    for (key, value) in &options.env {
        let injected = match value {
            Value::Bool(_) | Value::Number(_) => value.clone(),
            other => Value::String(other.to_string()),
        };
        env.insert(format!("process.env.{key}"), injected);
    }

    env
}

/// Quote a string into a JSON code snippet, e.g. `client` -> `"client"`.
fn json_quoted(s: &str) -> Value {
    Value::String(Value::String(s.to_string()).to_string())
}
