//! Ordered configuration presets.

pub mod base;

pub use base::{base, base_transpile, define_env};
