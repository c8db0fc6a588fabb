//! Assertion evaluation.
//!
//! This module provides the runner that checks assertions against HTTP
//! responses and run configuration.

mod runner;

pub use runner::TestRunner;
