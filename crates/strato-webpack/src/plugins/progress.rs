//! Descriptors for the external progress and friendly-errors plugins.
//!
//! Only the configuration surface lives here; the plugins' runtime behavior
//! belongs to the external tooling.

use serde::{Deserialize, Serialize};

/// Progress-reporting plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressOptions {
    /// Build target name shown next to the bar.
    pub name: String,

    /// Bar color, keyed by build target.
    pub color: String,

    /// Enabled reporters.
    pub reporters: Vec<String>,

    /// Print a stats summary when the build finishes.
    pub stats: bool,
}

/// Friendly-errors plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendlyErrorsOptions {
    pub clear_console: bool,
    pub reporter: String,
    pub log_level: String,
}

impl Default for FriendlyErrorsOptions {
    fn default() -> Self {
        Self {
            clear_console: false,
            reporter: "consola".to_string(),
            log_level: "ERROR".to_string(),
        }
    }
}
