#![allow(dead_code)]

use std::path::Path;

use switchcmd::config::{RawSettings, Settings};
use switchcmd::job::Job;
use switchcmd::types::LaunchMode;

/// Builder for `Job` with harmless defaults.
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new(switch_ip: &str) -> Self {
        Self {
            job: Job {
                switch_ip: switch_ip.to_string(),
                username: "admin".to_string(),
                password: "secret".to_string(),
                commands: "show version".to_string(),
            },
        }
    }

    pub fn username(mut self, username: &str) -> Self {
        self.job.username = username.to_string();
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.job.password = password.to_string();
        self
    }

    pub fn commands(mut self, commands: &str) -> Self {
        self.job.commands = commands.to_string();
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}

/// Builder for `Settings`, going through validation like a loaded file would.
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSettings::default(),
        }
    }

    pub fn launch(mut self, mode: LaunchMode) -> Self {
        self.raw.exec.launch = mode;
        self
    }

    pub fn script_dir(mut self, dir: &Path) -> Self {
        self.raw.exec.script_dir = dir.to_path_buf();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.raw.exec.timeout_secs = secs;
        self
    }

    pub fn strict_host_key_checking(mut self, val: bool) -> Self {
        self.raw.ssh.strict_host_key_checking = val;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.raw.ssh.port = port;
        self
    }

    pub fn extra_option(mut self, opt: &str) -> Self {
        self.raw.ssh.extra_options.push(opt.to_string());
        self
    }

    pub fn sshpass_program(mut self, program: &str) -> Self {
        self.raw.auth.sshpass_program = program.to_string();
        self
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
