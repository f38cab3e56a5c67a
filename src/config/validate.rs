// src/config/validate.rs

use crate::config::model::{RawSettings, Settings};
use crate::errors::{Result, SwitchcmdError};
use crate::types::LaunchMode;

impl TryFrom<RawSettings> for Settings {
    type Error = crate::errors::SwitchcmdError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(Settings::new_unchecked(raw.ssh, raw.auth, raw.exec))
    }
}

impl Settings {
    /// Apply command-line overrides and re-run validation, so e.g. switching
    /// to script mode still checks `[exec].shell`.
    pub fn with_overrides(
        self,
        launch: Option<LaunchMode>,
        timeout_secs: Option<u64>,
    ) -> Result<Settings> {
        let mut raw = RawSettings {
            ssh: self.ssh,
            auth: self.auth,
            exec: self.exec,
        };
        if let Some(mode) = launch {
            raw.exec.launch = mode;
        }
        if let Some(secs) = timeout_secs {
            raw.exec.timeout_secs = secs;
        }
        Settings::try_from(raw)
    }
}

fn validate_raw_settings(cfg: &RawSettings) -> Result<()> {
    validate_programs(cfg)?;
    validate_ssh_options(cfg)?;
    Ok(())
}

fn validate_programs(cfg: &RawSettings) -> Result<()> {
    require_non_empty("[ssh].program", &cfg.ssh.program)?;
    require_non_empty("[auth].sshpass_program", &cfg.auth.sshpass_program)?;

    if cfg.exec.launch == LaunchMode::Script {
        require_non_empty("[exec].shell", &cfg.exec.shell)?;
        if cfg.exec.script_dir.as_os_str().is_empty() {
            return Err(SwitchcmdError::ConfigError(
                "[exec].script_dir must not be empty in script launch mode".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_ssh_options(cfg: &RawSettings) -> Result<()> {
    if cfg.ssh.port == 0 {
        return Err(SwitchcmdError::ConfigError(
            "[ssh].port must be >= 1 (got 0)".to_string(),
        ));
    }

    for alg in cfg.ssh.kex_algorithms.iter() {
        require_token("[ssh].kex_algorithms", alg)?;
    }
    for alg in cfg.ssh.host_key_algorithms.iter() {
        require_token("[ssh].host_key_algorithms", alg)?;
    }

    for opt in cfg.ssh.extra_options.iter() {
        require_token("[ssh].extra_options", opt)?;
        match opt.split_once('=') {
            Some((key, _)) if !key.is_empty() => {}
            _ => {
                return Err(SwitchcmdError::ConfigError(format!(
                    "[ssh].extra_options entry '{}' must have the form Key=Value",
                    opt
                )));
            }
        }
    }

    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SwitchcmdError::ConfigError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

// Each of these ends up as a single `-o` argument (and inside a script line in
// script mode), so whitespace would split or corrupt it.
fn require_token(field: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '\'') {
        return Err(SwitchcmdError::ConfigError(format!(
            "{field} entry '{}' must be non-empty and contain no whitespace or quotes",
            value
        )));
    }
    Ok(())
}
