//! Execute Request Use Case
//!
//! Sends a single, already-resolved request descriptor through the
//! [`HttpClient`] port.

use std::sync::Arc;

use apiprobe_domain::{request::RequestSpec, response::ResponseSpec};
use thiserror::Error;
use tracing::debug;

use crate::ports::{HttpClient, HttpClientError};

/// Result type for request execution.
pub type ExecuteResult = Result<ResponseSpec, ExecuteRequestError>;

/// Error type for the execute request use case.
#[derive(Debug, Clone, Error)]
pub enum ExecuteRequestError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("{0}")]
    HttpError(#[from] HttpClientError),
}

/// Use case for executing one HTTP request.
///
/// There is no retry: a transport failure is returned immediately.
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request and returns the response.
    ///
    /// # Validation
    ///
    /// - URL must not be empty
    /// - URL must be an absolute http:// or https:// URL
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError` on validation or transport failures.
    pub async fn execute(&self, request: &RequestSpec) -> ExecuteResult {
        Self::validate(request)?;

        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.client.execute(request).await?;
        debug!(
            status = response.status,
            elapsed = %response.duration_display(),
            "response received"
        );

        Ok(response)
    }

    fn validate(request: &RequestSpec) -> Result<(), ExecuteRequestError> {
        if request.url.trim().is_empty() {
            return Err(ExecuteRequestError::EmptyUrl);
        }

        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            return Err(ExecuteRequestError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                request.url
            )));
        }

        request
            .parse_url()
            .map_err(|e| ExecuteRequestError::InvalidUrl(format!("{e}: {}", request.url)))?;

        Ok(())
    }
}
