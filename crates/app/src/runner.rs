//! The run pipeline shared by the CLI and integration tests.

use std::sync::Arc;

use apiprobe_application::RunSuites;
use apiprobe_domain::{RunConfig, RunReport, TestSuite};
use apiprobe_infrastructure::{ReqwestHttpClient, RunnerSettings, TestRunner};
use tracing::info;

use crate::error::AppError;

/// Runs `suites` over HTTP with the reqwest client and the assertion runner.
///
/// # Errors
///
/// Returns [`AppError::Client`] if the HTTP client cannot be built. Case
/// failures are part of the report, never an error.
pub async fn execute_suites(
    config: RunConfig,
    settings: RunnerSettings,
    suites: Vec<TestSuite>,
) -> Result<RunReport, AppError> {
    let client = Arc::new(ReqwestHttpClient::with_timeout(settings.timeout_ms)?);
    info!(
        suites = suites.len(),
        timeout_ms = settings.timeout_ms,
        "executing suites"
    );

    let report = RunSuites::new(client, Arc::new(TestRunner::new()), Arc::new(config))
        .with_mode(settings.mode)
        .run(suites)
        .await;
    Ok(report)
}
