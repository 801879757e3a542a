//! Framework plugin descriptors.

pub mod progress;
pub mod warning_ignore;

pub use progress::{FriendlyErrorsOptions, ProgressOptions};
pub use warning_ignore::{WarningIgnorePlugin, warning_ignore_filter};
