// src/channel.rs

//! Line-delimited JSON transport for jobs.
//!
//! Each non-blank input line is one job record; each gets exactly one result
//! line back, in order. Production wires this to stdin/stdout; anything
//! implementing the tokio I/O traits works.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::errors::Result;
use crate::exec::SessionRunner;
use crate::handler::handle_job;
use crate::job::{JobRecord, JobResult};

/// Serve jobs until `reader` reaches end of input.
///
/// Returns the number of result records written. Only transport failures
/// (reading the channel, writing a result) are returned as errors; undecodable
/// bytes are not one of them.
pub async fn serve<R, W>(
    mut reader: R,
    mut writer: W,
    settings: &Settings,
    runner: &dyn SessionRunner,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut answered = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        // Invalid UTF-8 must not take the channel down with it; bad bytes
        // become U+FFFD and the record is judged on what's left.
        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.trim();
        if line.is_empty() {
            continue;
        }

        let result = match JobRecord::from_line(line) {
            Ok(record) => {
                info!(job_id = ?record.id, job = ?record.job, "received job");
                handle_job(&record.job, settings, runner).await
            }
            Err(err) => {
                warn!(error = %err, "malformed job record");
                JobResult::from(&err)
            }
        };

        write_result(&mut writer, &result).await?;
        answered += 1;
        debug!(code = result.code, answered, "result written");
    }

    Ok(answered)
}

/// Write one result as a single JSON line and flush it.
pub async fn write_result<W>(writer: &mut W, result: &JobResult) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = serde_json::to_vec(result)?;
    buf.push(b'\n');
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}
