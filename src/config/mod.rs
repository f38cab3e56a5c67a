// src/config/mod.rs

//! Settings loading and validation.
//!
//! - [`model`]: serde structs mirroring the TOML layout, with defaults.
//! - [`loader`]: reading files and resolving which file to read.
//! - [`validate`]: `TryFrom<RawSettings> for Settings`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve, CONFIG_ENV_VAR};
pub use model::{AuthSection, ExecSection, RawSettings, Settings, SshSection};
