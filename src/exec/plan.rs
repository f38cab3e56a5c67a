// src/exec/plan.rs

//! Fully resolved process invocations for a remote session.

use std::fmt;
use std::path::Path;

use crate::config::Settings;
use crate::job::Job;

/// Environment variable `sshpass -e` reads the password from.
pub const SSHPASS_ENV: &str = "SSHPASS";

/// Everything a [`SessionRunner`](super::SessionRunner) needs to start one
/// process: program, argument vector, child-only environment and an optional
/// stdin payload.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionPlan {
    pub program: String,
    pub args: Vec<String>,
    /// Set on the child only; never on this process.
    pub env: Vec<(String, String)>,
    pub stdin: Option<String>,
}

impl SessionPlan {
    /// `sshpass -e ssh <options> -l <user> -- <ip>`, with the password in
    /// `SSHPASS` and the command payload on stdin.
    pub fn direct(job: &Job, settings: &Settings) -> Self {
        let mut args = vec!["-e".to_string(), settings.ssh.program.clone()];
        args.extend(ssh_options(settings));
        args.extend([
            "-l".to_string(),
            job.username.clone(),
            "--".to_string(),
            job.switch_ip.clone(),
        ]);

        Self {
            program: settings.auth.sshpass_program.clone(),
            args,
            env: vec![(SSHPASS_ENV.to_string(), job.password.clone())],
            stdin: Some(stdin_payload(&job.commands)),
        }
    }

    /// `<shell> <script>` for a rendered script artifact.
    pub fn script(shell: &str, script_path: &Path) -> Self {
        Self {
            program: shell.to_string(),
            args: vec![script_path.display().to_string()],
            env: Vec::new(),
            stdin: None,
        }
    }
}

impl fmt::Debug for SessionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_keys: Vec<&str> = self.env.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("SessionPlan")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("env", &env_keys)
            .field("stdin_bytes", &self.stdin.as_ref().map(String::len))
            .finish()
    }
}

/// ssh flags derived from `[ssh]`, in the order they are passed.
pub fn ssh_options(settings: &Settings) -> Vec<String> {
    let ssh = &settings.ssh;
    let mut opts = Vec::new();

    if ssh.force_tty {
        opts.push("-tt".to_string());
    }
    opts.push("-p".to_string());
    opts.push(ssh.port.to_string());

    if !ssh.kex_algorithms.is_empty() {
        opts.push("-o".to_string());
        opts.push(format!("KexAlgorithms={}", ssh.kex_algorithms.join(",")));
    }
    if !ssh.host_key_algorithms.is_empty() {
        opts.push("-o".to_string());
        opts.push(format!("HostKeyAlgorithms={}", ssh.host_key_algorithms.join(",")));
    }
    if !ssh.strict_host_key_checking {
        opts.push("-o".to_string());
        opts.push("StrictHostKeyChecking=no".to_string());
    }
    for extra in ssh.extra_options.iter() {
        opts.push("-o".to_string());
        opts.push(extra.clone());
    }

    opts
}

/// The payload as a here-document would deliver it: trailing newlines
/// collapsed to exactly one.
pub fn stdin_payload(commands: &str) -> String {
    let mut payload = commands.trim_end_matches(['\r', '\n']).to_string();
    payload.push('\n');
    payload
}
