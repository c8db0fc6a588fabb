//! apiprobe - HTTP API assertion test runner
//!
//! Wires the layers together: built-in suites, command-line handling,
//! logging setup and the run pipeline.

pub mod builtin;
pub mod cli;
pub mod error;
pub mod logging;
pub mod runner;

pub use cli::Cli;
pub use error::AppError;
pub use runner::execute_suites;
