//! Whole-run orchestration.

use std::sync::Arc;
use std::time::Instant;

use apiprobe_domain::{CaseKind, CaseOutcome, CaseReport, RunConfig, RunReport, SuiteReport, TestSuite};
use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{error, info};

use super::run_suite::RunSuite;
use crate::ports::{AssertionEvaluator, HttpClient};

/// How suites are scheduled relative to each other.
///
/// Cases inside a suite always run in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One suite after another.
    #[default]
    Sequential,
    /// All suites at once; the report keeps declaration order.
    Parallel,
}

/// Runs a list of suites and produces the run report.
pub struct RunSuites<C: HttpClient + 'static, E: AssertionEvaluator + 'static> {
    run_suite: Arc<RunSuite<C, E>>,
    mode: ExecutionMode,
}

impl<C: HttpClient + 'static, E: AssertionEvaluator + 'static> RunSuites<C, E> {
    /// Creates the use case.
    pub fn new(client: Arc<C>, evaluator: Arc<E>, config: Arc<RunConfig>) -> Self {
        Self {
            run_suite: Arc::new(RunSuite::new(client, evaluator, config)),
            mode: ExecutionMode::default(),
        }
    }

    /// Sets the scheduling mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Runs every suite.
    pub async fn run(&self, suites: Vec<TestSuite>) -> RunReport {
        let started_at = Utc::now();
        let started = Instant::now();
        info!(suites = suites.len(), mode = ?self.mode, "starting run");

        let reports = match self.mode {
            ExecutionMode::Sequential => {
                let mut reports = Vec::with_capacity(suites.len());
                for suite in &suites {
                    reports.push(self.run_suite.run(suite).await);
                }
                reports
            }
            ExecutionMode::Parallel => self.run_parallel(suites).await,
        };

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = started.elapsed().as_millis() as u64;
        let report = RunReport::new(started_at, reports, duration_ms);
        info!(
            total = report.total(),
            failed = report.failed(),
            duration_ms,
            "run finished"
        );
        report
    }

    async fn run_parallel(&self, suites: Vec<TestSuite>) -> Vec<SuiteReport> {
        let names: Vec<String> = suites.iter().map(|s| s.name.clone()).collect();
        let mut set = JoinSet::new();
        for (index, suite) in suites.into_iter().enumerate() {
            let run_suite = Arc::clone(&self.run_suite);
            set.spawn(async move { (index, run_suite.run(&suite).await) });
        }

        let mut slots: Vec<Option<SuiteReport>> = vec![None; names.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, report)) => slots[index] = Some(report),
                Err(e) => error!(error = %e, "suite task aborted"),
            }
        }

        slots
            .into_iter()
            .zip(names)
            .map(|(slot, name)| slot.unwrap_or_else(|| aborted_suite(name)))
            .collect()
    }
}

fn aborted_suite(name: String) -> SuiteReport {
    let case = CaseReport {
        name: "suite task".to_string(),
        kind: CaseKind::Independent,
        outcome: CaseOutcome::InvalidRequest {
            message: "suite task aborted before reporting".to_string(),
        },
        assertions: Vec::new(),
        status: None,
        requests_sent: 0,
        duration_ms: 0,
    };
    SuiteReport::new(name, vec![case], 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::execute_request::tests::MockHttpClient;
    use crate::use_cases::test_support::StubEvaluator;
    use apiprobe_domain::{Assertion, ComparisonOperator, RequestSpec, ResponseSpec, TestCase};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn suites() -> Vec<TestSuite> {
        vec![
            TestSuite::new("Users API").with_case(
                TestCase::request("list users", RequestSpec::get("https://jp.test/users"))
                    .expect_status(200)
                    .expect_length(ComparisonOperator::Equals, 3),
            ),
            TestSuite::new("GET API").with_case(
                TestCase::request("base url", RequestSpec::get("{{API_BASE_URL}}/users"))
                    .expect_status(200),
            ),
            TestSuite::new("Repo variable").with_case(
                TestCase::config_check("REPO_VARIABLE is 31").expect(Assertion::config(
                    "REPO_VARIABLE",
                    ComparisonOperator::Equals,
                    json!(31),
                )),
            ),
        ]
    }

    fn runner(config: RunConfig) -> (Arc<MockHttpClient>, RunSuites<MockHttpClient, StubEvaluator>) {
        let client = Arc::new(
            MockHttpClient::new().route("https://jp.test/users", ResponseSpec::json(200, &json!([1, 2, 3]))),
        );
        let run = RunSuites::new(Arc::clone(&client), Arc::new(StubEvaluator), Arc::new(config));
        (client, run)
    }

    #[tokio::test]
    async fn test_sequential_run() {
        let (client, run) = runner(RunConfig::new().with("REPO_VARIABLE", "31"));

        let report = run.run(suites()).await;

        assert_eq!(report.total(), 3);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.suites[1].cases[0].outcome,
            CaseOutcome::ConfigMissing {
                name: "API_BASE_URL".to_string()
            }
        );
        assert_eq!(report.exit_code(), 1);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_parallel_keeps_declaration_order() {
        let config = RunConfig::new()
            .with("REPO_VARIABLE", "31")
            .with("API_BASE_URL", "https://jp.test");
        let (client, run) = runner(config);

        let report = run.with_mode(ExecutionMode::Parallel).run(suites()).await;

        let names: Vec<&str> = report.suites.iter().map(|s| s.suite_name.as_str()).collect();
        assert_eq!(names, vec!["Users API", "GET API", "Repo variable"]);
        assert!(report.all_passed());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_run_passes() {
        let (_, run) = runner(RunConfig::new());

        let report = run.run(Vec::new()).await;

        assert_eq!(report.total(), 0);
        assert_eq!(report.exit_code(), 0);
    }
}
