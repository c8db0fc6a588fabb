//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A JSON path expression is malformed.
    #[error("invalid JSON path '{path}': {reason}")]
    InvalidJsonPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A suite or case definition is invalid.
    #[error("invalid suite definition: {0}")]
    InvalidSuite(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
