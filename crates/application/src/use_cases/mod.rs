//! Use cases
//!
//! Suite registration and the case → suite → run execution pipeline.

mod define_suite;
mod run_case;
mod run_suite;
mod run_suites;

pub use define_suite::SuiteRegistry;
pub use run_case::{CaseContext, CaseRun, RunCase};
pub use run_suite::RunSuite;
pub use run_suites::{ExecutionMode, RunSuites};
