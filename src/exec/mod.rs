// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`plan`] turns a job plus settings into a [`SessionPlan`] (program,
//!   argv, child environment, stdin).
//! - [`script`] renders the legacy shell-script form of a session and owns
//!   the on-disk artifact.
//! - [`runner`] provides the `SessionRunner` trait and the `ProcessRunner`
//!   used in production, which tests replace with a fake.

pub mod plan;
pub mod runner;
pub mod script;

pub use plan::SessionPlan;
pub use runner::{ExecOutcome, ProcessRunner, SessionRunner};
pub use script::{render_script, ScriptArtifact};
