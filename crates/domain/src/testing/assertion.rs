//! Assertions evaluated against a response or the run configuration.

use serde::{Deserialize, Serialize};

/// A single check run against a case's response or configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    Status {
        /// Expected status code or range.
        expected: StatusExpectation,
    },
    /// Check a body property exists and optionally equals a value.
    BodyProperty {
        /// Path into the JSON body (e.g., "$.data.id").
        path: String,
        /// Expected value; `None` only checks presence.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expected: Option<serde_json::Value>,
    },
    /// Compare a body property against a value.
    BodyCompare {
        /// Path into the JSON body.
        path: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Value to compare against.
        value: serde_json::Value,
    },
    /// Compare the length of an array or string in the body.
    Length {
        /// Path to the array or string; `$` is the body itself.
        #[serde(default = "root_path")]
        path: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Length to compare against.
        length: usize,
    },
    /// Check header exists and optionally its value.
    HeaderExists {
        /// Header name (case-insensitive).
        name: String,
        /// Optional expected value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Compare a named configuration value.
    ConfigValue {
        /// Configuration value name.
        name: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Value to compare against.
        value: serde_json::Value,
    },
}

fn root_path() -> String {
    "$".to_string()
}

impl Assertion {
    /// Status equals `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::Status {
            expected: StatusExpectation::Exact(code),
        }
    }

    /// Body property at `path` equals `expected`.
    #[must_use]
    pub fn property(path: impl Into<String>, expected: serde_json::Value) -> Self {
        Self::BodyProperty {
            path: path.into(),
            expected: Some(expected),
        }
    }

    /// Body property at `path` exists.
    #[must_use]
    pub fn exists(path: impl Into<String>) -> Self {
        Self::BodyProperty {
            path: path.into(),
            expected: None,
        }
    }

    /// Body property at `path` compares to `value`.
    #[must_use]
    pub fn compare(
        path: impl Into<String>,
        operator: ComparisonOperator,
        value: serde_json::Value,
    ) -> Self {
        Self::BodyCompare {
            path: path.into(),
            operator,
            value,
        }
    }

    /// Length of the body itself compares to `length`.
    #[must_use]
    pub fn length(operator: ComparisonOperator, length: usize) -> Self {
        Self::Length {
            path: root_path(),
            operator,
            length,
        }
    }

    /// Configuration value `name` compares to `value`.
    #[must_use]
    pub fn config(
        name: impl Into<String>,
        operator: ComparisonOperator,
        value: serde_json::Value,
    ) -> Self {
        Self::ConfigValue {
            name: name.into(),
            operator,
            value,
        }
    }

    /// Returns true if this assertion inspects configuration, not a response.
    #[must_use]
    pub const fn targets_config(&self) -> bool {
        matches!(self, Self::ConfigValue { .. })
    }

    /// Returns the body path this assertion reads, if any.
    #[must_use]
    pub fn body_path(&self) -> Option<&str> {
        match self {
            Self::BodyProperty { path, .. }
            | Self::BodyCompare { path, .. }
            | Self::Length { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Status { expected } => format!("Status code {}", expected.description()),
            Self::BodyProperty {
                path,
                expected: Some(v),
            } => format!("Body {path} equals {v}"),
            Self::BodyProperty {
                path,
                expected: None,
            } => format!("Body {path} exists"),
            Self::BodyCompare {
                path,
                operator,
                value,
            } => format!("Body {path} {} {value}", operator.symbol()),
            Self::Length {
                path,
                operator,
                length,
            } => format!("Length of {path} {} {length}", operator.symbol()),
            Self::HeaderExists {
                name,
                value: Some(v),
            } => format!("Header '{name}' equals '{v}'"),
            Self::HeaderExists { name, value: None } => format!("Header '{name}' exists"),
            Self::ConfigValue {
                name,
                operator,
                value,
            } => format!("Config {name} {} {value}", operator.symbol()),
        }
    }
}

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// Comparison operators for value assertions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
    /// Contains (for strings/arrays).
    Contains,
    /// Matches regex pattern.
    Matches,
}

impl ComparisonOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Contains => "contains",
            Self::Matches => "matches",
        }
    }

    /// Compares two lengths. `Contains` and `Matches` never hold for lengths.
    #[must_use]
    pub const fn compare_len(self, actual: usize, expected: usize) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::NotEquals => actual != expected,
            Self::GreaterThan => actual > expected,
            Self::GreaterThanOrEqual => actual >= expected,
            Self::LessThan => actual < expected,
            Self::LessThanOrEqual => actual <= expected,
            Self::Contains | Self::Matches => false,
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Error message if failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}
