//! Error types for configuration loading and merging.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config not found")]
    NotFound,

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("invalid override fragment: {0}")]
    InvalidOverride(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
