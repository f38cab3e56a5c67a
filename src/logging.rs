// src/logging.rs

//! Logging setup for `switchcmd` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `SWITCHCMD_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`
//!
//! Logs always go to STDERR: STDOUT is the job channel, and anything else
//! written there would corrupt the result records.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "SWITCHCMD_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = cli_level
        .map(tracing::Level::from)
        .or_else(|| std::env::var(LOG_ENV_VAR).ok().and_then(|s| parse_level(&s)))
        .unwrap_or(tracing::Level::WARN);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

/// Parse a `SWITCHCMD_LOG` value; unknown values are ignored.
pub fn parse_level(s: &str) -> Option<tracing::Level> {
    s.trim().parse().ok()
}

impl From<LogLevel> for tracing::Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
