//! Errors that stop a run before or after the suites execute.

use apiprobe_application::{HttpClientError, SuiteDefinitionError};
use apiprobe_infrastructure::{ConfigLoadError, SerializationError, SuiteLoadError};
use thiserror::Error;

/// Failures outside any single case. All map to exit code 2.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    /// A suite file could not be loaded.
    #[error(transparent)]
    SuiteLoad(#[from] SuiteLoadError),

    /// A suite is invalid, duplicated or unknown.
    #[error(transparent)]
    SuiteDefinition(#[from] SuiteDefinitionError),

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(#[from] HttpClientError),

    /// The report could not be rendered.
    #[error(transparent)]
    Report(#[from] SerializationError),
}
