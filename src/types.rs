// src/types.rs

use std::str::FromStr;
use serde::Deserialize;

/// How the remote session is launched.
///
/// - `Direct`: spawn `sshpass -e ssh ...` with an argument vector, the password
///   in the child's `SSHPASS` environment and the command payload on stdin.
///   Nothing is interpolated by a shell (default).
/// - `Script`: render a shell script artifact into `exec.script_dir` and run it
///   with `exec.shell`. Kept for setups that audit or hand-edit the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    Direct,
    Script,
}

impl Default for LaunchMode {
    fn default() -> Self {
        LaunchMode::Direct
    }
}

impl FromStr for LaunchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(LaunchMode::Direct),
            "script" => Ok(LaunchMode::Script),
            other => Err(format!(
                "invalid launch mode: {other} (expected \"direct\" or \"script\")"
            )),
        }
    }
}
