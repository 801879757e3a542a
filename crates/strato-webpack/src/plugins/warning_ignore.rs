//! Warning suppression plugin.
//!
//! The bundler reports every warning through the composed predicate here;
//! a warning any ignore filter claims is dropped, everything else surfaces.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use strato_config::{BuildWarning, StratoOptions, WarningFilter};

/// Descriptor for the warning-ignore plugin slot.
///
/// The composed predicate is programmatic state: serde skips it, and a
/// descriptor deserialized from raw config keeps every warning.
#[derive(Clone, Serialize, Deserialize)]
pub struct WarningIgnorePlugin {
    #[serde(skip, default = "keep_all")]
    filter: WarningFilter,
}

impl WarningIgnorePlugin {
    pub fn new(filter: WarningFilter) -> Self {
        Self { filter }
    }

    /// Whether the bundler should surface this warning.
    pub fn keeps(&self, warn: &BuildWarning) -> bool {
        (self.filter)(warn)
    }
}

impl fmt::Debug for WarningIgnorePlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarningIgnorePlugin").finish_non_exhaustive()
    }
}

fn keep_all() -> WarningFilter {
    Arc::new(|_| true)
}

/// Compose the framework's built-in ignore filter with the user-supplied
/// predicates. The result keeps a warning when no filter claims it.
pub fn warning_ignore_filter(options: &StratoOptions) -> WarningFilter {
    // Hide warnings about plugins without a default export
    let mut filters: Vec<WarningFilter> = vec![Arc::new(|warn: &BuildWarning| {
        warn.name == "ModuleDependencyWarning"
            && warn.message.contains("export 'default'")
            && warn.message.contains("strato_plugin_")
    })];
    filters.extend(options.webpack.warning_ignore_filters.0.iter().cloned());

    Arc::new(move |warn| !filters.iter().any(|ignore| ignore(warn)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(name: &str, message: &str) -> BuildWarning {
        BuildWarning {
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn builtin_filter_hides_plugin_default_export_warnings() {
        let filter = warning_ignore_filter(&StratoOptions::default());
        let plugin = WarningIgnorePlugin::new(filter);

        assert!(!plugin.keeps(&warning(
            "ModuleDependencyWarning",
            "export 'default' (imported as 'mod') was not found in 'strato_plugin_analytics'",
        )));
        assert!(plugin.keeps(&warning(
            "ModuleDependencyWarning",
            "export 'default' was not found in 'some-user-module'",
        )));
        assert!(plugin.keeps(&warning("OtherWarning", "anything")));
    }

    #[test]
    fn user_filters_compose_with_builtin() {
        let mut options = StratoOptions::default();
        options
            .webpack
            .warning_ignore_filters
            .0
            .push(Arc::new(|warn: &BuildWarning| {
                warn.message.contains("sourcemap")
            }));

        let plugin = WarningIgnorePlugin::new(warning_ignore_filter(&options));
        assert!(!plugin.keeps(&warning("Whatever", "failed to load sourcemap")));
        assert!(plugin.keeps(&warning("Whatever", "unrelated")));
    }
}
