// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// Environment variable consulted when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "SWITCHCMD_CONFIG";

/// Load a settings file from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: RawSettings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Load a settings file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(&path)?;
    let settings = Settings::try_from(raw)?;
    Ok(settings)
}

/// Resolve settings for a run.
///
/// Priority: explicit path (from `--config`), then `SWITCHCMD_CONFIG`, then
/// built-in defaults. A path that was asked for but can't be read is an
/// error; there is no silent fallback to defaults.
pub fn resolve(explicit: Option<&Path>) -> Result<Settings> {
    match explicit.map(Path::to_path_buf).or_else(config_path_from_env) {
        Some(path) => load_and_validate(path),
        None => Ok(Settings::default()),
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
