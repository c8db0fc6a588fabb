//! Test case definitions.

use serde::{Deserialize, Serialize};

use super::assertion::{Assertion, ComparisonOperator};
use crate::request::RequestSpec;

/// Whether a case stands alone or depends on an earlier case's fixtures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    /// Reads nothing produced by other cases.
    #[default]
    Independent,
    /// Reads fixtures captured by earlier cases in the same suite.
    Integration,
}

/// What a case does before its assertions run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseAction {
    /// Issue exactly one HTTP request.
    Request(RequestSpec),
    /// Inspect configuration values only; no request is issued.
    ConfigCheck,
}

/// Stores the body value at `path` under `name` once the case passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Fixture name later cases refer to as `{{name}}`.
    pub name: String,
    /// Path into the JSON body.
    pub path: String,
}

/// A named, independently reported unit of test execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Case name, unique within its suite.
    pub name: String,
    /// Independent or integration.
    #[serde(default)]
    pub kind: CaseKind,
    /// Request to issue or configuration check.
    pub action: CaseAction,
    /// Assertions, evaluated top to bottom.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Fixtures to capture from the response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captures: Vec<Capture>,
}

impl TestCase {
    /// Creates a case that issues `request`.
    #[must_use]
    pub fn request(name: impl Into<String>, request: RequestSpec) -> Self {
        Self {
            name: name.into(),
            kind: CaseKind::Independent,
            action: CaseAction::Request(request),
            assertions: Vec::new(),
            captures: Vec::new(),
        }
    }

    /// Creates a case that only checks configuration.
    #[must_use]
    pub fn config_check(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CaseKind::Independent,
            action: CaseAction::ConfigCheck,
            assertions: Vec::new(),
            captures: Vec::new(),
        }
    }

    /// Adds an assertion.
    #[must_use]
    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Expects status `code`.
    #[must_use]
    pub fn expect_status(self, code: u16) -> Self {
        self.expect(Assertion::status(code))
    }

    /// Expects body `path` to equal `value`.
    #[must_use]
    pub fn expect_property(self, path: &str, value: serde_json::Value) -> Self {
        self.expect(Assertion::property(path, value))
    }

    /// Expects body `path` to exist.
    #[must_use]
    pub fn expect_exists(self, path: &str) -> Self {
        self.expect(Assertion::exists(path))
    }

    /// Expects the body's length to compare to `length`.
    #[must_use]
    pub fn expect_length(self, operator: ComparisonOperator, length: usize) -> Self {
        self.expect(Assertion::length(operator, length))
    }

    /// Captures the body value at `path` as fixture `name`.
    #[must_use]
    pub fn capture(mut self, name: &str, path: &str) -> Self {
        self.captures.push(Capture {
            name: name.to_string(),
            path: path.to_string(),
        });
        self
    }

    /// Marks the case as depending on earlier fixtures.
    #[must_use]
    pub const fn integration(mut self) -> Self {
        self.kind = CaseKind::Integration;
        self
    }

    /// Returns the request, if this case issues one.
    #[must_use]
    pub const fn request_spec(&self) -> Option<&RequestSpec> {
        match &self.action {
            CaseAction::Request(request) => Some(request),
            CaseAction::ConfigCheck => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_case_builder() {
        let case = TestCase::request(
            "Verify Create (POST)",
            RequestSpec::post("https://x/users", json!({"name": "John Doe"})),
        )
        .expect_status(201)
        .expect_property("$.name", json!("John Doe"))
        .capture("userId", "$.id");

        assert_eq!(case.kind, CaseKind::Independent);
        assert_eq!(case.assertions.len(), 2);
        assert_eq!(case.captures[0].name, "userId");
        assert!(case.request_spec().is_some());
    }

    #[test]
    fn test_config_check_case() {
        let case = TestCase::config_check("repo variable")
            .expect(Assertion::config("REPO_VARIABLE", ComparisonOperator::Equals, json!(31)));
        assert!(case.request_spec().is_none());
        assert!(case.assertions[0].targets_config());
    }

    #[test]
    fn test_deserialize_config_check() {
        let case: TestCase = serde_json::from_value(json!({
            "name": "env",
            "action": "config_check",
            "assertions": [
                {"type": "config_value", "name": "REPO_VARIABLE", "operator": "equals", "value": 31}
            ]
        }))
        .expect("valid case");
        assert_eq!(case.action, CaseAction::ConfigCheck);
    }
}
