//! File-based config discovery for CLI use.
//!
//! Finds and loads Strato configuration from conventional locations. Library
//! users should call `StratoOptions::from_value()` directly.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::options::StratoOptions;

/// Searches for Strato configuration files under a root directory.
///
/// # Example
///
/// ```no_run
/// use strato_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let options = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory.
    ///
    /// Searches in this order:
    /// 1. `strato.toml`
    /// 2. `package.json` with a `strato` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join("strato.toml");
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get("strato").is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load options from the discovered file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<StratoOptions> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    fn load_from(&self, path: &Path) -> Result<StratoOptions> {
        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            return self.load_from_package_json(path);
        }

        let content = fs::read_to_string(path)?;

        let toml_val: toml::Value = toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidValue(format!("invalid TOML syntax: {e}")))?;

        let value = serde_json::to_value(toml_val)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded strato config");
        StratoOptions::from_value(value)
    }

    fn load_from_package_json(&self, path: &Path) -> Result<StratoOptions> {
        let content = fs::read_to_string(path)?;

        let parsed: Value = serde_json::from_str(&content)
            .map_err(|e| ConfigError::InvalidValue(format!("invalid JSON: {e}")))?;

        let strato_value = parsed.get("strato").ok_or_else(|| {
            ConfigError::InvalidValue("add a 'strato' field to your package.json".to_string())
        })?;

        if strato_value.is_null() {
            return Err(ConfigError::InvalidValue(
                "the 'strato' field cannot be null".to_string(),
            ));
        }

        StratoOptions::from_value(strato_value.clone())
    }
}

/// Discover and load options from the current directory.
pub fn discover() -> Result<StratoOptions> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
