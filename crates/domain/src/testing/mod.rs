//! Test cases, assertions and run reports.
//!
//! A [`TestSuite`] is an ordered list of [`TestCase`]s. Each case issues a
//! single request (or checks configuration) and evaluates its
//! [`Assertion`]s against the result.

mod assertion;
mod case;
mod fixtures;
mod path;
mod report;
mod suite;

pub use assertion::{Assertion, AssertionResult, ComparisonOperator, StatusExpectation};
pub use case::{Capture, CaseAction, CaseKind, TestCase};
pub use fixtures::Fixtures;
pub use path::{JsonPath, PathSegment};
pub use report::{AssertionFailure, CaseOutcome, CaseReport, RunReport, SuiteReport};
pub use suite::TestSuite;
