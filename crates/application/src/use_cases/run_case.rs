//! Single-case execution.
//!
//! A case is a straight line: resolve templates, send one request, check
//! the status gate, run assertions top to bottom until the first failure,
//! then capture fixtures. Every error is caught here and turned into the
//! case's outcome; nothing propagates to sibling cases.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use apiprobe_domain::{
    Assertion, AssertionFailure, AssertionResult, CaseAction, CaseOutcome, CaseReport,
    ConfigMissing, Fixtures, JsonPath, ResponseSpec, RunConfig, StatusExpectation, TestCase,
};
use tracing::{debug, warn};

use crate::error::CaseError;
use crate::execute_request::ExecuteRequest;
use crate::ports::{AssertionEvaluator, HttpClient};
use crate::variable_resolver::{ResolutionContext, VariableResolver};

/// Read-only inputs a case runs against.
#[derive(Debug, Clone, Copy)]
pub struct CaseContext<'a> {
    /// Run configuration.
    pub config: &'a RunConfig,
    /// Fixtures captured so far in this suite.
    pub fixtures: &'a Fixtures,
    /// Every fixture name some case in this suite captures.
    pub suite_captures: &'a BTreeSet<String>,
}

/// Outcome of one case plus the fixtures it captured.
#[derive(Debug, Clone)]
pub struct CaseRun {
    /// The reported result.
    pub report: CaseReport,
    /// Captured fixtures; empty unless the case passed.
    pub captured: Vec<(String, serde_json::Value)>,
}

#[derive(Default)]
struct CaseTrace {
    assertions: Vec<AssertionResult>,
    status: Option<u16>,
    requests_sent: u32,
}

/// Use case running one [`TestCase`].
pub struct RunCase<C: HttpClient, E: AssertionEvaluator> {
    execute: ExecuteRequest<C>,
    evaluator: Arc<E>,
}

impl<C: HttpClient, E: AssertionEvaluator> RunCase<C, E> {
    /// Creates the use case.
    pub const fn new(client: Arc<C>, evaluator: Arc<E>) -> Self {
        Self {
            execute: ExecuteRequest::new(client),
            evaluator,
        }
    }

    /// Runs the case and reports how it ended.
    pub async fn run(&self, case: &TestCase, ctx: CaseContext<'_>) -> CaseRun {
        let started = Instant::now();
        let mut trace = CaseTrace::default();

        let (outcome, captured) = match self.execute_case(case, ctx, &mut trace).await {
            Ok(captured) => (CaseOutcome::Passed, captured),
            Err(err) => {
                warn!(case = %case.name, error = %err, "case failed");
                (err.into_outcome(), Vec::new())
            }
        };

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = started.elapsed().as_millis() as u64;

        CaseRun {
            report: CaseReport {
                name: case.name.clone(),
                kind: case.kind,
                outcome,
                assertions: trace.assertions,
                status: trace.status,
                requests_sent: trace.requests_sent,
                duration_ms,
            },
            captured,
        }
    }

    async fn execute_case(
        &self,
        case: &TestCase,
        ctx: CaseContext<'_>,
        trace: &mut CaseTrace,
    ) -> Result<Vec<(String, serde_json::Value)>, CaseError> {
        let request = match &case.action {
            CaseAction::ConfigCheck => {
                self.check_config(case, ctx.config, trace)?;
                return Ok(Vec::new());
            }
            CaseAction::Request(request) => request,
        };

        let resolver = VariableResolver::new(ResolutionContext::new(ctx.config, ctx.fixtures));
        let request = resolver.resolve_request(request).map_err(|unresolved| {
            if ctx.suite_captures.contains(&unresolved.name) {
                CaseError::InvalidRequest(format!(
                    "fixture '{}' was not captured by an earlier case",
                    unresolved.name
                ))
            } else {
                CaseError::ConfigMissing(ConfigMissing {
                    name: unresolved.name,
                })
            }
        })?;

        trace.requests_sent += 1;
        let response = self.execute.execute(&request).await?;
        trace.status = Some(response.status);

        if request.fail_on_status_code && !(200..400).contains(&response.status) {
            let result = AssertionResult::fail_with_value(
                Assertion::Status {
                    expected: StatusExpectation::Range { min: 200, max: 399 },
                },
                response.status.to_string(),
                format!(
                    "status {} is not 2xx/3xx and fail_on_status_code is set",
                    response.status_code()
                ),
            );
            return Err(record_failure(trace, result));
        }

        for assertion in &case.assertions {
            let result = self.evaluator.evaluate(assertion, &response);
            if !result.passed {
                return Err(record_failure(trace, result));
            }
            trace.assertions.push(result);
        }

        let captured = capture_fixtures(case, &response)?;
        debug!(case = %case.name, captured = captured.len(), "case passed");
        Ok(captured)
    }

    fn check_config(
        &self,
        case: &TestCase,
        config: &RunConfig,
        trace: &mut CaseTrace,
    ) -> Result<(), CaseError> {
        for assertion in &case.assertions {
            let result = self.evaluator.evaluate_config(assertion, config)?;
            if !result.passed {
                return Err(record_failure(trace, result));
            }
            trace.assertions.push(result);
        }
        Ok(())
    }
}

fn record_failure(trace: &mut CaseTrace, result: AssertionResult) -> CaseError {
    let failure = AssertionFailure::from_result(&result);
    trace.assertions.push(result);
    CaseError::Assertion(failure)
}

fn capture_fixtures(
    case: &TestCase,
    response: &ResponseSpec,
) -> Result<Vec<(String, serde_json::Value)>, CaseError> {
    if case.captures.is_empty() {
        return Ok(Vec::new());
    }

    let capture_failure = |name: &str, path: &str, message: String| {
        CaseError::Assertion(AssertionFailure {
            description: format!("Capture {name} from {path}"),
            actual: None,
            message,
        })
    };

    let body = response.body_json().map_err(|e| {
        capture_failure("fixtures", "$", format!("body is not valid JSON: {e}"))
    })?;

    case.captures
        .iter()
        .map(|capture| {
            let path = JsonPath::parse(&capture.path)
                .map_err(|e| capture_failure(&capture.name, &capture.path, e.to_string()))?;
            path.query(&body)
                .map(|value| (capture.name.clone(), value.into_owned()))
                .ok_or_else(|| {
                    capture_failure(&capture.name, &capture.path, "path not found".to_string())
                })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::execute_request::tests::MockHttpClient;
    use crate::ports::HttpClientError;
    use crate::use_cases::test_support::StubEvaluator;
    use apiprobe_domain::{ComparisonOperator, RequestSpec};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const USERS: &str = "https://reqres.test/api/users";

    fn runner(client: MockHttpClient) -> (Arc<MockHttpClient>, RunCase<MockHttpClient, StubEvaluator>) {
        let client = Arc::new(client);
        let run = RunCase::new(Arc::clone(&client), Arc::new(StubEvaluator));
        (client, run)
    }

    async fn run_one(
        run: &RunCase<MockHttpClient, StubEvaluator>,
        case: &TestCase,
        config: &RunConfig,
    ) -> CaseRun {
        let fixtures = Fixtures::new();
        let captures = BTreeSet::new();
        run.run(
            case,
            CaseContext {
                config,
                fixtures: &fixtures,
                suite_captures: &captures,
            },
        )
        .await
    }

    fn create_case() -> TestCase {
        TestCase::request(
            "Verify Create (POST)",
            RequestSpec::post(USERS, json!({"name": "John Doe", "job": "QA Engineer"})),
        )
        .expect_status(201)
        .expect_property("$.name", json!("John Doe"))
        .expect_property("$.job", json!("QA Engineer"))
        .capture("userId", "$.id")
    }

    #[tokio::test]
    async fn test_post_created_passes_and_captures() {
        let body = json!({"name": "John Doe", "job": "QA Engineer", "id": "123"});
        let (client, run) = runner(MockHttpClient::new().route(USERS, ResponseSpec::json(201, &body)));

        let result = run_one(&run, &create_case(), &RunConfig::new()).await;

        assert!(result.report.passed());
        assert_eq!(result.report.requests_sent, 1);
        assert_eq!(result.report.assertions.len(), 3);
        assert_eq!(result.captured, vec![("userId".to_string(), json!("123"))]);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_post_with_wrong_status_fails_fast() {
        let body = json!({"name": "John Doe", "job": "QA Engineer", "id": "123"});
        let (client, run) = runner(MockHttpClient::new().route(USERS, ResponseSpec::json(200, &body)));

        let result = run_one(&run, &create_case(), &RunConfig::new()).await;

        assert!(matches!(result.report.outcome, CaseOutcome::AssertionFailed { .. }));
        assert_eq!(result.report.assertions.len(), 1);
        assert!(result.captured.is_empty());
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_is_distinct() {
        let (client, run) = runner(
            MockHttpClient::new().fail(USERS, HttpClientError::Timeout { timeout_ms: 30_000 }),
        );

        let result = run_one(&run, &create_case(), &RunConfig::new()).await;

        assert_eq!(
            result.report.outcome,
            CaseOutcome::TransportFailed {
                message: "request timed out after 30000 ms".to_string(),
                timeout: true,
            }
        );
        assert_eq!(result.report.status, None);
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_config_missing_sends_nothing() {
        let (client, run) = runner(MockHttpClient::new());
        let case = TestCase::request("list", RequestSpec::get("{{API_BASE_URL}}/users"))
            .expect_status(200);

        let result = run_one(&run, &case, &RunConfig::new()).await;

        assert_eq!(
            result.report.outcome,
            CaseOutcome::ConfigMissing {
                name: "API_BASE_URL".to_string()
            }
        );
        assert_eq!(result.report.requests_sent, 0);
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_config_template_resolved_into_url() {
        let (client, run) = runner(
            MockHttpClient::new().route("https://jp.test/users", ResponseSpec::json(200, &json!([1, 2]))),
        );
        let case = TestCase::request("list", RequestSpec::get("{{API_BASE_URL}}/users"))
            .expect_status(200)
            .expect_length(ComparisonOperator::Equals, 2);
        let config = RunConfig::new().with("API_BASE_URL", "https://jp.test");

        let result = run_one(&run, &case, &config).await;

        assert!(result.report.passed());
        assert_eq!(client.seen()[0].url, "https://jp.test/users");
    }

    #[tokio::test]
    async fn test_fail_on_status_code_gate() {
        let url = format!("{USERS}/2");
        let (_, run) = runner(
            MockHttpClient::new().route(&url, ResponseSpec::json(404, &json!({}))),
        );

        let gated = TestCase::request("delete", RequestSpec::delete(url.clone())).expect_status(404);
        let result = run_one(&run, &gated, &RunConfig::new()).await;
        assert!(matches!(result.report.outcome, CaseOutcome::AssertionFailed { .. }));

        let ungated = TestCase::request(
            "delete",
            RequestSpec::delete(url).fail_on_status_code(false),
        )
        .expect_status(404);
        let result = run_one(&run, &ungated, &RunConfig::new()).await;
        assert!(result.report.passed());
    }

    #[tokio::test]
    async fn test_missing_capture_path_fails() {
        let (_, run) = runner(
            MockHttpClient::new().route(USERS, ResponseSpec::json(201, &json!({"name": "John Doe", "job": "QA Engineer"}))),
        );

        let result = run_one(&run, &create_case(), &RunConfig::new()).await;

        match result.report.outcome {
            CaseOutcome::AssertionFailed { failure } => {
                assert_eq!(failure.description, "Capture userId from $.id");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_config_check_case() {
        let (client, run) = runner(MockHttpClient::new());
        let case = TestCase::config_check("repo variable").expect(Assertion::config(
            "REPO_VARIABLE",
            ComparisonOperator::Equals,
            json!(31),
        ));

        let passed = run_one(&run, &case, &RunConfig::new().with("REPO_VARIABLE", "31")).await;
        assert!(passed.report.passed());

        let missing = run_one(&run, &case, &RunConfig::new()).await;
        assert_eq!(
            missing.report.outcome,
            CaseOutcome::ConfigMissing {
                name: "REPO_VARIABLE".to_string()
            }
        );
        assert_eq!(client.calls(), 0);
    }
}
