//! # strato-webpack
//!
//! Bundler configuration assembly for the Strato meta-framework.
//!
//! One build target (client, server, modern) gets one mutable
//! [`WebpackConfigContext`]; the [`base`] preset applies a fixed, ordered
//! list of configuration concerns to it and the finished [`WebpackConfig`]
//! is handed wholesale to the external bundler.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use strato_config::StratoOptions;
//! use strato_webpack::{BundleName, WebpackConfigContext, base};
//!
//! # fn main() -> strato_webpack::Result<()> {
//! let options = Arc::new(StratoOptions::default());
//! let mut ctx = WebpackConfigContext::new(options, BundleName::Client);
//! base(&mut ctx)?;
//!
//! let config = ctx.into_config();
//! assert_eq!(config.mode.as_str(), "production");
//! # Ok(()) }
//! ```

pub mod config;
pub mod context;
pub mod plugins;
pub mod presets;
pub mod utils;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
pub mod logging;

#[cfg(feature = "logging")]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

pub use config::{
    BuildPlugin, CacheOption, DefineMap, Mode, ModuleConfig, OutputConfig, ResolveConfig,
    ResolveLoaderConfig, WebpackConfig,
};
pub use context::{BundleName, Preset, WebpackConfigContext, apply_presets};
pub use plugins::{
    FriendlyErrorsOptions, ProgressOptions, WarningIgnorePlugin, warning_ignore_filter,
};
pub use presets::{base, base_transpile, define_env};
pub use utils::{Artifact, file_name, join_url, transpile_regex};

// Re-export the options crate so consumers need a single dependency
pub use strato_config::{self as options, StratoOptions, TranspilePattern};

/// Error type for configuration assembly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The assembled or merged configuration is not valid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for configuration assembly.
pub type Result<T> = std::result::Result<T, Error>;
