//! HTTP client port

use std::future::Future;

use apiprobe_domain::{request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

/// Transport-level failures. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// No response within the configured time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying error.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Redirect limit exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Anything else reported by the transport.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Returns true for the timeout subtype.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpClient: Send + Sync {
    /// Issues exactly one HTTP request and waits for the full response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other transport problems. HTTP error statuses are
    /// *not* errors at this level.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}
