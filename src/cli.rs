// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::LaunchMode;

/// Command-line arguments for `switchcmd`.
///
/// Without `--describe`, the process reads job records from stdin and writes
/// result records to stdout until stdin is closed.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "switchcmd",
    version,
    about = "Scheduler plugin that runs commands on network switches over SSH.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a settings file (TOML).
    ///
    /// If omitted, `SWITCHCMD_CONFIG` is consulted, then built-in defaults
    /// are used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the plugin descriptor as JSON and exit without reading jobs.
    #[arg(long)]
    pub describe: bool,

    /// Launch mode (`direct` or `script`); overrides `[exec].launch`.
    #[arg(long, value_name = "MODE")]
    pub launch: Option<LaunchMode>,

    /// Session timeout in seconds; overrides `[exec].timeout_secs`. 0 disables it.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SWITCHCMD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
