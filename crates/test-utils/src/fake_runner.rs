use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use switchcmd::errors::{Result, SwitchcmdError};
use switchcmd::exec::{ExecOutcome, SessionPlan, SessionRunner};

type Inspector = Box<dyn Fn(&SessionPlan) + Send + Sync>;

/// What the fake should pretend happened.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Exited(ExecOutcome),
    TimedOut(Duration),
    SpawnFailed(String),
}

/// A fake runner that:
/// - records every plan it was asked to run
/// - optionally calls an inspector while the plan is "running"
/// - replies with a canned response instead of spawning anything.
pub struct FakeRunner {
    response: FakeResponse,
    plans: Arc<Mutex<Vec<SessionPlan>>>,
    inspector: Option<Inspector>,
}

impl FakeRunner {
    pub fn new(response: FakeResponse) -> Self {
        Self {
            response,
            plans: Arc::new(Mutex::new(Vec::new())),
            inspector: None,
        }
    }

    /// Exit 0 with the given stdout.
    pub fn succeeding(stdout: &str) -> Self {
        Self::new(FakeResponse::Exited(ExecOutcome {
            success: true,
            exit_code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }))
    }

    /// Exit with `code` and the given stderr.
    pub fn failing(code: i32, stderr: &str) -> Self {
        Self::new(FakeResponse::Exited(ExecOutcome {
            success: false,
            exit_code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }))
    }

    pub fn with_inspector(mut self, f: impl Fn(&SessionPlan) + Send + Sync + 'static) -> Self {
        self.inspector = Some(Box::new(f));
        self
    }

    /// Shared handle to the recorded plans.
    pub fn plans(&self) -> Arc<Mutex<Vec<SessionPlan>>> {
        Arc::clone(&self.plans)
    }

    pub fn run_count(&self) -> usize {
        self.plans.lock().unwrap().len()
    }
}

impl SessionRunner for FakeRunner {
    fn run<'a>(
        &'a self,
        plan: &'a SessionPlan,
        _timeout: Option<Duration>,
    ) -> Pin<Box<dyn Future<Output = Result<ExecOutcome>> + Send + 'a>> {
        Box::pin(async move {
            self.plans.lock().unwrap().push(plan.clone());

            if let Some(inspect) = &self.inspector {
                inspect(plan);
            }

            match &self.response {
                FakeResponse::Exited(outcome) => Ok(outcome.clone()),
                FakeResponse::TimedOut(limit) => Err(SwitchcmdError::SessionTimeout(*limit)),
                FakeResponse::SpawnFailed(msg) => Err(SwitchcmdError::Spawn {
                    program: plan.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, msg.clone()),
                }),
            }
        })
    }
}
