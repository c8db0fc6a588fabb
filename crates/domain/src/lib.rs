//! apiprobe Domain - Core test runner types
//!
//! This crate defines the domain model for the apiprobe API test runner:
//! request descriptors, responses, assertions, suites and reports.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod testing;

pub use config::{ConfigMissing, RunConfig};
pub use error::{DomainError, DomainResult};
pub use request::{HttpMethod, RequestBody, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use testing::{
    Assertion, AssertionFailure, AssertionResult, Capture, CaseAction, CaseKind, CaseOutcome,
    CaseReport, ComparisonOperator, Fixtures, JsonPath, RunReport, StatusExpectation, SuiteReport,
    TestCase, TestSuite,
};
