// src/lib.rs

pub mod address;
pub mod channel;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod handler;
pub mod job;
pub mod logging;
pub mod metadata;
pub mod types;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::exec::ProcessRunner;

pub use crate::handler::handle_job;
pub use crate::job::{Job, JobResult};

/// High-level entry point used by `main.rs`: [`run_with_io`] over
/// stdin/stdout.
pub async fn run(args: CliArgs) -> Result<()> {
    run_with_io(args, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Run against an arbitrary job channel.
///
/// In `--describe` mode this writes the plugin descriptor and returns without
/// touching `reader` or the settings file. Otherwise it resolves settings,
/// applies CLI overrides and serves jobs until `reader` is exhausted.
pub async fn run_with_io<R, W>(args: CliArgs, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if args.describe {
        let mut buf = Vec::new();
        metadata::write_descriptor(&mut buf).context("rendering plugin descriptor")?;
        writer.write_all(&buf).await.context("writing plugin descriptor")?;
        writer.flush().await.context("writing plugin descriptor")?;
        return Ok(());
    }

    let settings = config::resolve(args.config.as_deref())
        .and_then(|s| s.with_overrides(args.launch, args.timeout))
        .context("loading settings")?;
    debug!(?settings, "settings resolved");

    let runner = ProcessRunner::new();
    let answered = channel::serve(reader, writer, &settings, &runner)
        .await
        .context("serving job channel")?;

    info!(answered, "job channel closed");
    Ok(())
}
