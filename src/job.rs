// src/job.rs

//! Job and result records exchanged over the job channel.
//!
//! Inbound records come either wrapped in the scheduler envelope
//! (`{"id": "...", "params": {...}}`) or flat, with the job fields at the top
//! level. Outbound records are always `{"complete":1,"code":N,"description":"..."}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, SwitchcmdError};

/// Fixed description for jobs whose target address fails validation.
pub const INVALID_ADDRESS_DESCRIPTION: &str = "Supplied Switch IP is not a valid IPv4 address.";

/// One request to run commands on a switch.
///
/// Missing fields deserialize as empty strings; an empty `switch_ip` is then
/// rejected by the address validator like any other malformed address.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub switch_ip: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Multi-line command payload fed to the remote shell.
    #[serde(default)]
    pub commands: String,
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("switch_ip", &self.switch_ip)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("commands", &format_args!("<{} lines>", self.commands.lines().count()))
            .finish()
    }
}

/// Wire shapes accepted on the input channel.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireRecord {
    Envelope {
        #[serde(default)]
        id: Option<Value>,
        params: Job,
    },
    Flat(Job),
}

/// A job together with the scheduler-assigned id, if any.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub id: Option<String>,
    pub job: Job,
}

impl JobRecord {
    /// Parse one line of the input channel.
    ///
    /// Only JSON objects count: serde would otherwise also build a `Job` from
    /// a positional array like `["1.2.3.4","u","p","c"]`.
    pub fn from_line(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line)?;
        require_object(&value, "job record")?;
        if let Some(params) = value.get("params") {
            require_object(params, "params")?;
        }

        let record: WireRecord = serde_json::from_value(value)?;
        Ok(match record {
            WireRecord::Envelope { id, params } => JobRecord {
                id: id.map(|v| match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                }),
                job: params,
            },
            WireRecord::Flat(job) => JobRecord { id: None, job },
        })
    }
}

fn require_object(value: &Value, what: &str) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(SwitchcmdError::JsonError(serde::de::Error::custom(format!(
            "{what} must be a JSON object"
        ))))
    }
}

/// The single completion record written back for every job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    /// Always `1`: every record this plugin writes is terminal.
    pub complete: u8,
    /// `0` on success, `1` on any failure.
    pub code: u8,
    pub description: String,
}

impl JobResult {
    pub fn success(stdout: &str) -> Self {
        Self::new(0, format!("Output: {stdout}"))
    }

    pub fn failure(stderr: &str) -> Self {
        Self::new(1, format!("Error: {stderr}"))
    }

    pub fn invalid_address() -> Self {
        Self::new(1, INVALID_ADDRESS_DESCRIPTION.to_string())
    }

    pub fn malformed(reason: impl fmt::Display) -> Self {
        Self::new(1, format!("Malformed job record: {reason}"))
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    fn new(code: u8, description: String) -> Self {
        Self {
            complete: 1,
            code,
            description,
        }
    }
}

impl From<&SwitchcmdError> for JobResult {
    fn from(err: &SwitchcmdError) -> Self {
        match err {
            SwitchcmdError::InvalidAddress(_) => JobResult::invalid_address(),
            SwitchcmdError::SessionTimeout(_) => JobResult::new(1, format!("Timeout: {err}")),
            SwitchcmdError::JsonError(e) => JobResult::malformed(e),
            other => JobResult::failure(&other.to_string()),
        }
    }
}
