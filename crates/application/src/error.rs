//! Application error types

use apiprobe_domain::{AssertionFailure, CaseOutcome, ConfigMissing, DomainError};
use thiserror::Error;

use crate::execute_request::ExecuteRequestError;
use crate::ports::HttpClientError;

/// Why a single case failed. Caught at the case boundary.
#[derive(Debug, Clone, Error)]
pub enum CaseError {
    /// The service could not be reached.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// The service answered with the wrong data.
    #[error("assertion failed: {0}")]
    Assertion(AssertionFailure),

    /// A required configuration value is absent.
    #[error(transparent)]
    ConfigMissing(#[from] ConfigMissing),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CaseError {
    /// Converts the error into the reported outcome.
    #[must_use]
    pub fn into_outcome(self) -> CaseOutcome {
        match self {
            Self::Transport(e) => CaseOutcome::TransportFailed {
                timeout: e.is_timeout(),
                message: e.to_string(),
            },
            Self::Assertion(failure) => CaseOutcome::AssertionFailed { failure },
            Self::ConfigMissing(missing) => CaseOutcome::ConfigMissing { name: missing.name },
            Self::InvalidRequest(message) => CaseOutcome::InvalidRequest { message },
        }
    }
}

impl From<ExecuteRequestError> for CaseError {
    fn from(err: ExecuteRequestError) -> Self {
        match err {
            ExecuteRequestError::HttpError(e) => Self::Transport(e),
            other => Self::InvalidRequest(other.to_string()),
        }
    }
}

/// A suite could not be registered or selected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuiteDefinitionError {
    /// The suite's structure is invalid.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// Another suite already uses the name.
    #[error("suite '{0}' is already defined")]
    DuplicateSuite(String),

    /// No suite has the requested name.
    #[error("unknown suite '{0}'")]
    UnknownSuite(String),

    /// An independent case reads a fixture captured by an earlier case.
    #[error("case '{case}' reads fixture '{fixture}' and must be marked as an integration case")]
    UndeclaredIntegration {
        /// Offending case.
        case: String,
        /// Fixture it reads.
        fixture: String,
    },

    /// A case reads a fixture that is only captured later in the suite.
    #[error("case '{case}' reads fixture '{fixture}' before any case captures it")]
    ForwardFixtureReference {
        /// Offending case.
        case: String,
        /// Fixture it reads.
        fixture: String,
    },
}
