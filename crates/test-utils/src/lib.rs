pub mod builders;
pub mod fake_runner;

use std::sync::Once;
use std::time::Duration;

use switchcmd::job::JobResult;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests, captured per test via `with_test_writer()`.
///
/// Defaults to `switchcmd=debug`; override with `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,switchcmd=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Upper bound for any single test; real sessions in tests finish in well
/// under a second.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a future, failing the test if it exceeds [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .expect("test exceeded TEST_TIMEOUT")
}

/// Parse everything a channel adapter wrote, one result per line.
pub fn parse_results(out: &[u8]) -> Vec<JobResult> {
    std::str::from_utf8(out)
        .expect("result channel is utf-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is a result record"))
        .collect()
}
