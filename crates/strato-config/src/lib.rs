//! Strato framework options.
//!
//! Typed option tree for the Strato meta-framework: serde structs with total
//! defaults, JSON-value round-tripping, last-write-wins override merging, and
//! file-based discovery (`strato.toml` or a `strato` field in
//! `package.json`). The bundler configuration pipeline in `strato-webpack`
//! consumes these options.

pub mod discovery;
pub mod error;
pub mod merge;
pub mod options;
pub mod webpack;

pub use discovery::{ConfigDiscovery, discover};
pub use error::{ConfigError, Result};
pub use merge::merge_values;
pub use options::{AppOptions, BuildSection, ExperimentalOptions, StratoOptions, Target};
pub use webpack::{
    BuildWarning, FileNameTemplates, PluginSpec, TranspilePattern, WarningFilter, WarningFilters,
    WebpackSection,
};
