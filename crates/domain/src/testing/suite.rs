//! Test suites: ordered, named groups of cases.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::case::{CaseAction, TestCase};
use super::path::JsonPath;
use crate::error::{DomainError, DomainResult};

/// An ordered collection of cases sharing a theme.
///
/// Cases run in declaration order. Suites are independent of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Suite name.
    pub name: String,
    /// Cases in execution order.
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    /// Create a new empty test suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Add a case to the suite.
    pub fn add(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    /// Add a case (builder pattern).
    #[must_use]
    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Check if the suite is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Get the number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Checks the suite's structure.
    ///
    /// Rejects empty names, duplicate case names, malformed body paths,
    /// configuration assertions on request cases, response assertions or
    /// captures on configuration checks, and empty capture names.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSuite`] or
    /// [`DomainError::InvalidJsonPath`] describing the first problem found.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidSuite("suite name is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for case in &self.cases {
            let ctx = |msg: &str| {
                DomainError::InvalidSuite(format!("{} / {}: {msg}", self.name, case.name))
            };

            if case.name.trim().is_empty() {
                return Err(DomainError::InvalidSuite(format!(
                    "{}: case name is empty",
                    self.name
                )));
            }
            if !seen.insert(case.name.as_str()) {
                return Err(ctx("duplicate case name"));
            }

            for assertion in &case.assertions {
                if let Some(path) = assertion.body_path() {
                    JsonPath::parse(path)?;
                }
            }
            for capture in &case.captures {
                if capture.name.trim().is_empty() {
                    return Err(ctx("capture name is empty"));
                }
                JsonPath::parse(&capture.path)?;
            }

            match &case.action {
                CaseAction::Request(request) => {
                    if request.url.trim().is_empty() {
                        return Err(ctx("request URL is empty"));
                    }
                    if case.assertions.iter().any(|a| a.targets_config()) {
                        return Err(ctx("configuration assertions need a config_check case"));
                    }
                }
                CaseAction::ConfigCheck => {
                    if case.assertions.iter().any(|a| !a.targets_config()) {
                        return Err(ctx("config_check cases only take configuration assertions"));
                    }
                    if !case.captures.is_empty() {
                        return Err(ctx("config_check cases cannot capture fixtures"));
                    }
                }
            }
        }

        Ok(())
    }
}
