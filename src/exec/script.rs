// src/exec/script.rs

//! Script launch mode: render the session as a shell script and keep it on
//! disk for exactly as long as it runs.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tempfile::TempPath;
use tracing::debug;

use crate::config::Settings;
use crate::errors::Result;
use crate::exec::plan::{ssh_options, SSHPASS_ENV};
use crate::job::Job;

const HEREDOC_DELIMITER: &str = "SWITCHCMD_EOF";

/// Render the script body for `job`.
///
/// The three variables hold the job's values as single-quoted literals and the
/// command payload is a quoted here-document, so the local shell expands
/// neither. The password reaches `sshpass -e` through `SSHPASS` rather than
/// `-p`, which would expose it in the process list.
pub fn render_script(job: &Job, settings: &Settings) -> String {
    let delimiter = heredoc_delimiter(&job.commands);

    let mut ssh_cmd = vec![
        shell_quote(&settings.auth.sshpass_program),
        "-e".to_string(),
        shell_quote(&settings.ssh.program),
    ];
    ssh_cmd.extend(ssh_options(settings).iter().map(|o| shell_quote(o)));
    ssh_cmd.push(r#"-l "$SWITCH_USER" -- "$SWITCH_IP""#.to_string());

    format!(
        "#!/bin/sh\n\
         \n\
         SWITCH_IP={ip}\n\
         SWITCH_USER={user}\n\
         SWITCH_PASSWORD={password}\n\
         \n\
         {env}=\"$SWITCH_PASSWORD\" {ssh} <<'{delimiter}'\n\
         {commands}\
         {delimiter}\n",
        ip = shell_quote(&job.switch_ip),
        user = shell_quote(&job.username),
        password = shell_quote(&job.password),
        env = SSHPASS_ENV,
        ssh = ssh_cmd.join(" "),
        commands = super::plan::stdin_payload(&job.commands),
    )
}

/// Wrap `s` in single quotes; embedded `'` become `'\''`.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// First delimiter (`SWITCHCMD_EOF`, `SWITCHCMD_EOF_1`, ...) that is not a
/// line of the payload.
fn heredoc_delimiter(commands: &str) -> String {
    let mut delimiter = HEREDOC_DELIMITER.to_string();
    let mut n = 0;
    while commands.lines().any(|l| l.trim_end_matches('\r') == delimiter) {
        n += 1;
        delimiter = format!("{HEREDOC_DELIMITER}_{n}");
    }
    delimiter
}

/// A rendered script on disk, owner-only (`0700`), uniquely named per job.
///
/// The file is removed when the artifact is dropped.
#[derive(Debug)]
pub struct ScriptArtifact {
    path: TempPath,
}

impl ScriptArtifact {
    pub fn create(dir: &Path, body: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("switchcmd-")
            .suffix(".sh")
            .tempfile_in(dir)
            .with_context(|| format!("creating script artifact in {:?}", dir))?;

        restrict_to_owner(file.path())?;

        file.write_all(body.as_bytes())
            .with_context(|| format!("writing script artifact {:?}", file.path()))?;
        file.as_file()
            .sync_all()
            .with_context(|| format!("syncing script artifact {:?}", file.path()))?;

        let path = file.into_temp_path();
        debug!(path = ?path, "script artifact written");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
        .with_context(|| format!("setting permissions on {:?}", path))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}
