// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitchcmdError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Supplied Switch IP is not a valid IPv4 address.")]
    InvalidAddress(String),

    #[error("remote session did not finish within {}s", .0.as_secs())]
    SessionTimeout(Duration),

    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SwitchcmdError>;
