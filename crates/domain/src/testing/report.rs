//! Per-case, per-suite and per-run results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assertion::AssertionResult;
use super::case::CaseKind;

/// The first failed check of a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFailure {
    /// Human-readable description of the check.
    pub description: String,
    /// Actual value found, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Why it failed.
    pub message: String,
}

impl AssertionFailure {
    /// Builds a failure from a failed [`AssertionResult`].
    #[must_use]
    pub fn from_result(result: &AssertionResult) -> Self {
        Self {
            description: result.assertion.description(),
            actual: result.actual.clone(),
            message: result
                .error
                .clone()
                .unwrap_or_else(|| "assertion failed".to_string()),
        }
    }
}

impl std::fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.description, self.message)
    }
}

/// How a case ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Every assertion held.
    Passed,
    /// The service answered but the data was wrong.
    AssertionFailed {
        /// First failing check.
        failure: AssertionFailure,
    },
    /// The service could not be reached.
    TransportFailed {
        /// Transport error message.
        message: String,
        /// True if the failure was a timeout.
        #[serde(default)]
        timeout: bool,
    },
    /// A required configuration value was missing; nothing was sent.
    ConfigMissing {
        /// Missing value name.
        name: String,
    },
    /// The request could not be built (bad URL, unresolved fixture).
    InvalidRequest {
        /// Why the request was rejected.
        message: String,
    },
}

impl CaseOutcome {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Short label for reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::AssertionFailed { .. } => "assertion failed",
            Self::TransportFailed { .. } => "transport error",
            Self::ConfigMissing { .. } => "config missing",
            Self::InvalidRequest { .. } => "invalid request",
        }
    }

    /// Failure detail, `None` for a passing case.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Passed => None,
            Self::AssertionFailed { failure } => Some(failure.to_string()),
            Self::TransportFailed { message, .. } | Self::InvalidRequest { message } => {
                Some(message.clone())
            }
            Self::ConfigMissing { name } => Some(format!("configuration value '{name}' is not set")),
        }
    }
}

/// Result of one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Independent or integration.
    pub kind: CaseKind,
    /// How the case ended.
    pub outcome: CaseOutcome,
    /// Assertions evaluated, in order, up to and including the first failure.
    #[serde(default)]
    pub assertions: Vec<AssertionResult>,
    /// Response status, if a response arrived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Number of HTTP requests issued.
    pub requests_sent: u32,
    /// Wall time in milliseconds.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_passed()
    }
}

/// Results from running a test suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Test suite that was run.
    pub suite_name: String,
    /// Individual case results, in execution order.
    pub cases: Vec<CaseReport>,
    /// Total number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Create a suite report, deriving the counters from `cases`.
    #[must_use]
    pub fn new(suite_name: impl Into<String>, cases: Vec<CaseReport>, duration_ms: u64) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.passed()).count();

        Self {
            suite_name: suite_name.into(),
            cases,
            total,
            passed,
            failed: total - passed,
            duration_ms,
        }
    }

    /// Check if all cases passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Results of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Suite reports, in the order suites were declared.
    pub suites: Vec<SuiteReport>,
    /// Total wall time in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Creates a run report.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, suites: Vec<SuiteReport>, duration_ms: u64) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            started_at,
            suites,
            duration_ms,
        }
    }

    /// Total number of cases.
    #[must_use]
    pub fn total(&self) -> usize {
        self.suites.iter().map(|s| s.total).sum()
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.suites.iter().map(|s| s.failed).sum()
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.suites.iter().map(|s| s.passed).sum()
    }

    /// Check if every case of every suite passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.suites.iter().all(SuiteReport::all_passed)
    }

    /// Process exit code: 0 when everything passed, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.all_passed())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::testing::Assertion;

    fn case(name: &str, outcome: CaseOutcome) -> CaseReport {
        CaseReport {
            name: name.to_string(),
            kind: CaseKind::Independent,
            outcome,
            assertions: Vec::new(),
            status: Some(200),
            requests_sent: 1,
            duration_ms: 5,
        }
    }

    #[test]
    fn test_suite_report_counts() {
        let failure = AssertionFailure::from_result(&AssertionResult::fail_with_value(
            Assertion::status(204),
            "200",
            "Expected status = 204, got 200",
        ));
        let report = SuiteReport::new(
            "CRUD",
            vec![
                case("create", CaseOutcome::Passed),
                case("delete", CaseOutcome::AssertionFailed { failure }),
            ],
            10,
        );
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
        assert!((report.pass_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_run_report_exit_code() {
        let ok = SuiteReport::new("ok", vec![case("a", CaseOutcome::Passed)], 1);
        let bad = SuiteReport::new(
            "bad",
            vec![case(
                "b",
                CaseOutcome::TransportFailed {
                    message: "connection refused".to_string(),
                    timeout: false,
                },
            )],
            1,
        );

        let run = RunReport::new(Utc::now(), vec![ok.clone()], 1);
        assert_eq!(run.exit_code(), 0);

        let run = RunReport::new(Utc::now(), vec![ok, bad], 2);
        assert_eq!(run.exit_code(), 1);
        assert_eq!(run.total(), 2);
        assert_eq!(run.failed(), 1);
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let report = case("missing", CaseOutcome::ConfigMissing {
            name: "API_BASE_URL".to_string(),
        });
        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(json["outcome"]["kind"], "config_missing");
        assert_eq!(json["outcome"]["name"], "API_BASE_URL");
        assert_eq!(json["name"], "missing");
    }
}
