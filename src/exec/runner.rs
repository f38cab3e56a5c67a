// src/exec/runner.rs

//! Pluggable session runner.
//!
//! The job handler talks to a `SessionRunner` instead of spawning processes
//! itself, so tests can swap in a fake that records plans and returns canned
//! outcomes. [`ProcessRunner`] is the production implementation.

use std::future::Future;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::errors::{Result, SwitchcmdError};
use crate::exec::plan::SessionPlan;

/// What a finished session left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    pub success: bool,
    /// `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Trait abstracting how a [`SessionPlan`] is executed.
pub trait SessionRunner: Send + Sync {
    /// Run `plan` to completion, giving up after `timeout` if one is set.
    ///
    /// A process that starts and exits non-zero is an `Ok` outcome with
    /// `success == false`; `Err` is reserved for failing to start, I/O errors
    /// and timeouts.
    fn run<'a>(
        &'a self,
        plan: &'a SessionPlan,
        timeout: Option<Duration>,
    ) -> Pin<Box<dyn Future<Output = Result<ExecOutcome>> + Send + 'a>>;
}

/// Runs plans as local child processes via `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl SessionRunner for ProcessRunner {
    fn run<'a>(
        &'a self,
        plan: &'a SessionPlan,
        timeout: Option<Duration>,
    ) -> Pin<Box<dyn Future<Output = Result<ExecOutcome>> + Send + 'a>> {
        Box::pin(run_process(plan, timeout))
    }
}

async fn run_process(plan: &SessionPlan, timeout: Option<Duration>) -> Result<ExecOutcome> {
    info!(program = %plan.program, args = plan.args.len(), "starting session process");

    let mut cmd = Command::new(&plan.program);
    cmd.args(&plan.args)
        .envs(plan.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(if plan.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Own process group, so a timeout can take down `sh` -> `sshpass` -> `ssh`
    // together instead of only the direct child.
    #[cfg(unix)]
    {
        cmd.process_group(0);
    }

    let mut child = cmd.spawn().map_err(|source| SwitchcmdError::Spawn {
        program: plan.program.clone(),
        source,
    })?;
    let pgid = child.id();

    // Feed stdin from its own task so a chatty remote can't deadlock us on a
    // full stdout pipe while we're still writing.
    if let (Some(payload), Some(mut stdin)) = (plan.stdin.clone(), child.stdin.take()) {
        tokio::spawn(async move {
            if let Err(e) = stdin.write_all(payload.as_bytes()).await {
                debug!(error = %e, "session closed stdin before payload was written");
            }
            // Dropping `stdin` closes the pipe, which ends the remote shell.
        });
    }

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // The bound covers the pipes as well as the exit: a grandchild that keeps
    // stdout open would otherwise hang the job after `sh` has exited.
    let collected = match timeout {
        Some(limit) => {
            match tokio::time::timeout(limit, collect(&mut child, stdout, stderr)).await {
                Ok(res) => res?,
                Err(_) => {
                    warn!(timeout_secs = limit.as_secs(), "session timed out; killing process group");
                    kill_session(&mut child, pgid).await;
                    return Err(SwitchcmdError::SessionTimeout(limit));
                }
            }
        }
        None => collect(&mut child, stdout, stderr).await?,
    };
    let (status, stdout, stderr) = collected;

    let outcome = ExecOutcome {
        success: status.success(),
        exit_code: status.code(),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    };

    info!(
        exit_code = ?outcome.exit_code,
        success = outcome.success,
        stdout_bytes = stdout.len(),
        stderr_bytes = stderr.len(),
        "session process exited"
    );

    Ok(outcome)
}

/// Wait for exit while draining both pipes.
async fn collect(
    child: &mut Child,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
) -> Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
    let (status, stdout, stderr) = tokio::join!(child.wait(), read_all(stdout), read_all(stderr));
    Ok((status?, stdout?, stderr?))
}

async fn read_all<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// `pgid` is the pid captured at spawn: the direct child may already have been
/// reaped while its descendants still hold the pipes.
async fn kill_session(child: &mut Child, pgid: Option<u32>) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Some(pgid) = pgid {
            if let Err(e) = killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
                debug!(pgid, error = %e, "failed to signal session process group");
            }
        }
    }
    #[cfg(not(unix))]
    let _ = pgid;

    // Reap the direct child; also covers platforms without process groups.
    if let Err(e) = child.kill().await {
        debug!(error = %e, "failed to kill session process");
    }
}
