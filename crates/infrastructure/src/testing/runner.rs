//! Assertion evaluation.
//!
//! Checks a single [`Assertion`] against a response body or the run
//! configuration and produces an [`AssertionResult`].

use apiprobe_application::ports::AssertionEvaluator;
use apiprobe_domain::{
    Assertion, AssertionResult, ComparisonOperator, ConfigMissing, JsonPath, ResponseSpec,
    RunConfig, StatusExpectation,
};
use regex::Regex;
use serde_json::{Number, Value};

/// Evaluates assertions against responses and configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::Status { expected } => check_status_code(assertion, response, expected),
            Assertion::HeaderExists { name, value } => {
                check_header_exists(assertion, response, name, value.as_deref())
            }
            Assertion::BodyProperty { path, expected } => {
                with_json_path(assertion, response, path, |value| match expected {
                    Some(expected) if !json_eq(value, expected) => AssertionResult::fail_with_value(
                        assertion.clone(),
                        value.to_string(),
                        format!("{path} value mismatch: expected {expected}, got {value}"),
                    ),
                    _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
                })
            }
            Assertion::BodyCompare {
                path,
                operator,
                value: expected,
            } => with_json_path(assertion, response, path, |value| {
                if compare_json_values(value, *operator, expected) {
                    AssertionResult::pass_with_value(assertion.clone(), value.to_string())
                } else {
                    AssertionResult::fail_with_value(
                        assertion.clone(),
                        value.to_string(),
                        format!(
                            "{path} comparison failed: {value} {} {expected}",
                            operator.symbol()
                        ),
                    )
                }
            }),
            Assertion::Length {
                path,
                operator,
                length,
            } => with_json_path(assertion, response, path, |value| {
                check_length(assertion, path, value, *operator, *length)
            }),
            Assertion::ConfigValue { .. } => AssertionResult::fail(
                assertion.clone(),
                "configuration assertions are not evaluated against a response",
            ),
        }
    }

    /// Check a configuration assertion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigMissing`] if the named value is absent.
    pub fn run_config_assertion(
        &self,
        assertion: &Assertion,
        config: &RunConfig,
    ) -> Result<AssertionResult, ConfigMissing> {
        let Assertion::ConfigValue {
            name,
            operator,
            value: expected,
        } = assertion
        else {
            return Ok(AssertionResult::fail(
                assertion.clone(),
                "only configuration assertions can be checked without a response",
            ));
        };

        let actual = config.resolve_json(name)?;
        if compare_json_values(&actual, *operator, expected) {
            Ok(AssertionResult::pass_with_value(
                assertion.clone(),
                actual.to_string(),
            ))
        } else {
            Ok(AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!(
                    "{name} comparison failed: {actual} {} {expected}",
                    operator.symbol()
                ),
            ))
        }
    }
}

impl AssertionEvaluator for TestRunner {
    fn evaluate(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        self.run_assertion(assertion, response)
    }

    fn evaluate_config(
        &self,
        assertion: &Assertion,
        config: &RunConfig,
    ) -> Result<AssertionResult, ConfigMissing> {
        self.run_config_assertion(assertion, config)
    }
}

fn check_status_code(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: &StatusExpectation,
) -> AssertionResult {
    let actual = response.status;
    if expected.matches(actual) {
        AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual.to_string(),
            format!("Expected status {}, got {actual}", expected.description()),
        )
    }
}

fn check_header_exists(
    assertion: &Assertion,
    response: &ResponseSpec,
    name: &str,
    expected_value: Option<&str>,
) -> AssertionResult {
    match (response.get_header(name), expected_value) {
        (None, _) => AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found")),
        (Some(actual), Some(expected)) if actual != expected => AssertionResult::fail_with_value(
            assertion.clone(),
            actual.clone(),
            format!("Header '{name}' value mismatch: expected '{expected}', got '{actual}'"),
        ),
        (Some(actual), _) => AssertionResult::pass_with_value(assertion.clone(), actual.clone()),
    }
}

/// Parses the body, resolves `path`, and hands the value to `check`.
fn with_json_path<F>(
    assertion: &Assertion,
    response: &ResponseSpec,
    path: &str,
    check: F,
) -> AssertionResult
where
    F: FnOnce(&Value) -> AssertionResult,
{
    let json = match response.body_json() {
        Ok(json) => json,
        Err(e) => {
            return AssertionResult::fail(
                assertion.clone(),
                format!("Failed to parse body as JSON: {e}"),
            );
        }
    };

    let path_expr = match JsonPath::parse(path) {
        Ok(p) => p,
        Err(e) => return AssertionResult::fail(assertion.clone(), e.to_string()),
    };

    path_expr.query(&json).map_or_else(
        || AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found")),
        |value| check(&*value),
    )
}

fn check_length(
    assertion: &Assertion,
    path: &str,
    value: &Value,
    operator: ComparisonOperator,
    expected_length: usize,
) -> AssertionResult {
    let actual_length = match value {
        Value::Array(items) => items.len(),
        Value::String(s) => s.chars().count(),
        Value::Object(map) => map.len(),
        other => {
            return AssertionResult::fail_with_value(
                assertion.clone(),
                other.to_string(),
                format!("{path} has no length"),
            );
        }
    };

    if operator.compare_len(actual_length, expected_length) {
        AssertionResult::pass_with_value(assertion.clone(), actual_length.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual_length.to_string(),
            format!(
                "Length {actual_length} of {path} does not satisfy {} {expected_length}",
                operator.symbol()
            ),
        )
    }
}

/// Compare two JSON values using the given operator.
fn compare_json_values(actual: &Value, operator: ComparisonOperator, expected: &Value) -> bool {
    match operator {
        ComparisonOperator::Equals => json_eq(actual, expected),
        ComparisonOperator::NotEquals => !json_eq(actual, expected),
        ComparisonOperator::GreaterThan => compare_numeric(actual, expected, |a, b| a > b),
        ComparisonOperator::GreaterThanOrEqual => compare_numeric(actual, expected, |a, b| a >= b),
        ComparisonOperator::LessThan => compare_numeric(actual, expected, |a, b| a < b),
        ComparisonOperator::LessThanOrEqual => compare_numeric(actual, expected, |a, b| a <= b),
        ComparisonOperator::Contains => match (actual, expected) {
            (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
            (Value::Array(arr), _) => arr.contains(expected),
            _ => false,
        },
        ComparisonOperator::Matches => {
            if let (Value::String(s), Value::String(pattern)) = (actual, expected) {
                Regex::new(pattern).is_ok_and(|re| re.is_match(s))
            } else {
                false
            }
        }
    }
}

/// Equality where `31` and `31.0` are the same number, at any depth.
fn json_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => number_eq(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => actual == expected,
    }
}

/// Integers compare exactly; a float on either side compares as `f64`.
#[allow(clippy::float_cmp)]
fn number_eq(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if (a.is_i64() || a.is_u64()) && (b.is_i64() || b.is_u64()) {
        return false;
    }
    matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
}

/// Compare numeric values.
fn compare_numeric<F>(actual: &Value, expected: &Value, cmp: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}
