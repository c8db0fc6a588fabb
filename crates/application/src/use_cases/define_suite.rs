//! Suite registration.

use std::collections::HashSet;

use apiprobe_domain::{CaseKind, TestCase, TestSuite};
use tracing::debug;

use crate::error::SuiteDefinitionError;
use crate::variable_resolver::extract_variable_names;

/// Registry of named suites, kept in definition order.
#[derive(Debug, Default)]
pub struct SuiteRegistry {
    suites: Vec<TestSuite>,
}

impl SuiteRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named group of cases.
    ///
    /// # Errors
    ///
    /// See [`SuiteRegistry::define`].
    pub fn define_suite(
        &mut self,
        name: impl Into<String>,
        cases: Vec<TestCase>,
    ) -> Result<(), SuiteDefinitionError> {
        self.define(TestSuite {
            name: name.into(),
            cases,
        })
    }

    /// Validates and registers a suite.
    ///
    /// Besides the structural checks of [`TestSuite::validate`], a case
    /// that reads a fixture captured by an earlier case must be an
    /// integration case, and no case may read a fixture that is only
    /// captured later.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteDefinitionError`] describing the first problem.
    pub fn define(&mut self, suite: TestSuite) -> Result<(), SuiteDefinitionError> {
        suite.validate()?;
        if self.get(&suite.name).is_some() {
            return Err(SuiteDefinitionError::DuplicateSuite(suite.name));
        }
        check_fixture_references(&suite)?;

        debug!(suite = %suite.name, cases = suite.len(), "suite defined");
        self.suites.push(suite);
        Ok(())
    }

    /// Returns a suite by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TestSuite> {
        self.suites.iter().find(|s| s.name == name)
    }

    /// All suites in definition order.
    #[must_use]
    pub fn suites(&self) -> &[TestSuite] {
        &self.suites
    }

    /// Returns the named suites in the order given, or all suites when
    /// `names` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteDefinitionError::UnknownSuite`] for an unknown name.
    pub fn select(&self, names: &[String]) -> Result<Vec<TestSuite>, SuiteDefinitionError> {
        if names.is_empty() {
            return Ok(self.suites.clone());
        }
        names
            .iter()
            .map(|name| {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| SuiteDefinitionError::UnknownSuite(name.clone()))
            })
            .collect()
    }

    /// Number of registered suites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    /// Returns true if no suite is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

fn check_fixture_references(suite: &TestSuite) -> Result<(), SuiteDefinitionError> {
    let all_captures: HashSet<&str> = suite
        .cases
        .iter()
        .flat_map(|c| c.captures.iter().map(|cap| cap.name.as_str()))
        .collect();
    let mut captured_so_far: HashSet<&str> = HashSet::new();

    for case in &suite.cases {
        if let Some(request) = case.request_spec() {
            for name in request.template_strings().flat_map(extract_variable_names) {
                if captured_so_far.contains(name.as_str()) {
                    if case.kind != CaseKind::Integration {
                        return Err(SuiteDefinitionError::UndeclaredIntegration {
                            case: case.name.clone(),
                            fixture: name,
                        });
                    }
                } else if all_captures.contains(name.as_str()) {
                    return Err(SuiteDefinitionError::ForwardFixtureReference {
                        case: case.name.clone(),
                        fixture: name,
                    });
                }
            }
        }
        captured_so_far.extend(case.captures.iter().map(|c| c.name.as_str()));
    }

    Ok(())
}
