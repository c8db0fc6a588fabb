//! apiprobe Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the HTTP transport and assertion checks)
//! - Template resolution for `{{variable}}` placeholders
//! - Case, suite and run orchestration
//! - The case error taxonomy

pub mod error;
pub mod execute_request;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{CaseError, SuiteDefinitionError};
pub use execute_request::{ExecuteRequest, ExecuteRequestError, ExecuteResult};
pub use ports::{AssertionEvaluator, HttpClient, HttpClientError};
pub use use_cases::{
    CaseContext, CaseRun, ExecutionMode, RunCase, RunSuite, RunSuites, SuiteRegistry,
};
