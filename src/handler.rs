// src/handler.rs

//! The request/response contract: one [`Job`] in, one [`JobResult`] out.

use tracing::{info, warn};

use crate::address::validate_ipv4;
use crate::config::Settings;
use crate::errors::Result;
use crate::exec::{render_script, ExecOutcome, ScriptArtifact, SessionPlan, SessionRunner};
use crate::job::{Job, JobResult};
use crate::types::LaunchMode;

/// Handle a single job.
///
/// Never fails: validation, launch, timeout and remote errors all end up in
/// the returned record. The address is checked before anything touches the
/// filesystem or spawns a process.
pub async fn handle_job(job: &Job, settings: &Settings, runner: &dyn SessionRunner) -> JobResult {
    match run_job(job, settings, runner).await {
        Ok(outcome) => {
            info!(
                switch_ip = %job.switch_ip,
                success = outcome.success,
                exit_code = ?outcome.exit_code,
                "job finished"
            );
            result_from_outcome(&outcome)
        }
        Err(err) => {
            warn!(switch_ip = %job.switch_ip, error = %err, "job failed");
            JobResult::from(&err)
        }
    }
}

async fn run_job(job: &Job, settings: &Settings, runner: &dyn SessionRunner) -> Result<ExecOutcome> {
    validate_ipv4(&job.switch_ip)?;

    info!(
        switch_ip = %job.switch_ip,
        username = %job.username,
        launch = ?settings.exec.launch,
        "running commands on switch"
    );

    let timeout = settings.exec.timeout();

    match settings.exec.launch {
        LaunchMode::Direct => {
            let plan = SessionPlan::direct(job, settings);
            runner.run(&plan, timeout).await
        }
        LaunchMode::Script => {
            let body = render_script(job, settings);
            let artifact = ScriptArtifact::create(&settings.exec.script_dir, &body)?;
            let plan = SessionPlan::script(&settings.exec.shell, artifact.path());
            let outcome = runner.run(&plan, timeout).await;
            // Artifact is removed here, whatever the outcome.
            drop(artifact);
            outcome
        }
    }
}

fn result_from_outcome(outcome: &ExecOutcome) -> JobResult {
    if outcome.success {
        JobResult::success(&outcome.stdout)
    } else {
        JobResult::failure(&outcome.stderr)
    }
}
