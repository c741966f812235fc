use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to encode config: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("invalid value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl BenchError {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
