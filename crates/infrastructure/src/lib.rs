//! apiprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading,
//! suite files and report rendering.

pub mod adapters;
pub mod config;
pub mod reporting;
pub mod serialization;
pub mod testing;

pub use adapters::{DEFAULT_TIMEOUT_MS, ReqwestHttpClient};
pub use config::{ConfigLoadError, ENV_PREFIX, EnvConfigLoader, RunnerSettings, TIMEOUT_VAR};
pub use reporting::{ConsoleReporter, JsonReporter, Reporter};
pub use serialization::{
    SerializationError, SuiteFormat, SuiteLoadError, load_suite_file, parse_suites,
    to_json_stable,
};
pub use testing::TestRunner;
