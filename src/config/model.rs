// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::LaunchMode;

/// Settings as read from a TOML file.
///
/// ```toml
/// [ssh]
/// port = 22
/// strict_host_key_checking = false
/// kex_algorithms = ["+diffie-hellman-group14-sha1"]
/// host_key_algorithms = ["+ssh-rsa"]
///
/// [auth]
/// sshpass_program = "sshpass"
///
/// [exec]
/// launch = "direct"
/// timeout_secs = 300
/// ```
///
/// Every section and key is optional. The defaults reproduce the options old
/// switch firmware needs (legacy key exchange, `ssh-rsa` host keys, no host key
/// verification).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSettings {
    #[serde(default)]
    pub ssh: SshSection,

    #[serde(default)]
    pub auth: AuthSection,

    #[serde(default)]
    pub exec: ExecSection,
}

/// Validated settings.
///
/// Only constructed through `TryFrom<RawSettings>` (see `config::validate`),
/// so holders can rely on the checks in there.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ssh: SshSection,
    pub auth: AuthSection,
    pub exec: ExecSection,
}

impl Settings {
    pub(crate) fn new_unchecked(ssh: SshSection, auth: AuthSection, exec: ExecSection) -> Self {
        Self { ssh, auth, exec }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let raw = RawSettings::default();
        Self::new_unchecked(raw.ssh, raw.auth, raw.exec)
    }
}

/// `[ssh]` section: how the remote-login client is invoked.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SshSection {
    /// Remote-login client binary.
    pub program: String,

    pub port: u16,

    /// Pass `-tt` so the switch CLI gets a pseudo-terminal even though stdin
    /// is a pipe.
    pub force_tty: bool,

    /// `false` adds `-o StrictHostKeyChecking=no`.
    pub strict_host_key_checking: bool,

    /// Values for `-o KexAlgorithms=`; joined with commas. Empty omits the option.
    pub kex_algorithms: Vec<String>,

    /// Values for `-o HostKeyAlgorithms=`; joined with commas. Empty omits the option.
    pub host_key_algorithms: Vec<String>,

    /// Additional `Key=Value` strings, each passed as `-o Key=Value`.
    pub extra_options: Vec<String>,
}

impl Default for SshSection {
    fn default() -> Self {
        Self {
            program: "ssh".to_string(),
            port: 22,
            force_tty: true,
            strict_host_key_checking: false,
            kex_algorithms: vec!["+diffie-hellman-group14-sha1".to_string()],
            host_key_algorithms: vec!["+ssh-rsa".to_string()],
            extra_options: Vec::new(),
        }
    }
}

/// `[auth]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    /// Password-injection helper. Must understand `-e` (read `SSHPASS`) and
    /// `-p <password>`.
    pub sshpass_program: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            sshpass_program: "sshpass".to_string(),
        }
    }
}

/// `[exec]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecSection {
    pub launch: LaunchMode,

    /// Upper bound on a single remote session. `0` waits forever.
    pub timeout_secs: u64,

    /// Interpreter for script launch mode.
    pub shell: String,

    /// Where script artifacts are created in script launch mode.
    pub script_dir: PathBuf,
}

impl ExecSection {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ExecSection {
    fn default() -> Self {
        Self {
            launch: LaunchMode::default(),
            timeout_secs: 300,
            shell: "sh".to_string(),
            script_dir: std::env::temp_dir(),
        }
    }
}
