//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It issues exactly one request per call: no retries, redirects limited.

use std::collections::HashMap;
use std::error::Error as _;
use std::future::Future;
use std::time::{Duration, Instant};

use apiprobe_application::ports::{HttpClient, HttpClientError};
use apiprobe_domain::request::{HttpMethod, RequestSpec};
use apiprobe_domain::response::ResponseSpec;
use reqwest::{Client, Method, Url};
use tracing::trace;

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const MAX_REDIRECTS: usize = 10;
const USER_AGENT: &str = concat!("apiprobe/", env!("CARGO_PKG_VERSION"));

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    timeout_ms: u64,
}

impl ReqwestHttpClient {
    /// Creates a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_timeout(DEFAULT_TIMEOUT_MS)
    }

    /// Creates a client whose requests time out after `timeout_ms`.
    ///
    /// Configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "apiprobe/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_timeout(timeout_ms: u64) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, timeout_ms })
    }

    /// Timeout applied to every request.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Maps reqwest errors to the transport error taxonomy.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = error
            .url()
            .and_then(Url::host_str)
            .unwrap_or("unknown")
            .to_string();

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                    host,
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error with its sources; reqwest keeps the useful part in the chain.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send {
        let method = request.method;
        let url = request.url.clone();
        let headers = request.headers.clone();
        let content_type = request.body.content_type();
        let body = request.body.to_bytes();
        let timeout_ms = self.timeout_ms;

        async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), parsed_url);

            for (name, value) in &headers {
                builder = builder.header(name, value);
            }

            if let Some(content_type) = content_type {
                let has_content_type = headers
                    .keys()
                    .any(|name| name.eq_ignore_ascii_case("content-type"));
                if !has_content_type {
                    builder = builder.header("Content-Type", content_type);
                }
            }

            if let Some(bytes) = body {
                builder = builder.body(bytes);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let response_headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let duration = start.elapsed();
            trace!(status, bytes = body_bytes.len(), ?duration, "response body read");

            Ok(ResponseSpec::new(
                status,
                response_headers,
                &body_bytes,
                duration,
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{delete, get, post};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn echo_app() -> Router {
        Router::new()
            .route(
                "/api/users",
                post(|headers: HeaderMap, body: String| async move {
                    let mut created: Value = serde_json::from_str(&body).unwrap_or_default();
                    created["id"] = json!("123");
                    created["contentType"] = json!(
                        headers
                            .get("content-type")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                    );
                    (StatusCode::CREATED, axum::Json(created))
                }),
            )
            .route("/api/users/{id}", delete(|| async { StatusCode::NO_CONTENT }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    "late"
                }),
            )
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Put),
            Method::PUT
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new().unwrap();
        assert_eq!(client.timeout_ms(), DEFAULT_TIMEOUT_MS);
    }

    #[tokio::test]
    async fn test_post_json_body() {
        let base = serve(echo_app()).await;
        let client = ReqwestHttpClient::new().unwrap();

        let response = client
            .execute(&RequestSpec::post(
                format!("{base}/api/users"),
                json!({"name": "John Doe", "job": "QA Engineer"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        let body = response.body_json().unwrap();
        assert_eq!(body["name"], "John Doe");
        assert_eq!(body["id"], "123");
        assert_eq!(body["contentType"], "application/json");
    }

    #[tokio::test]
    async fn test_no_content_response() {
        let base = serve(echo_app()).await;
        let client = ReqwestHttpClient::new().unwrap();

        let response = client
            .execute(&RequestSpec::delete(format!("{base}/api/users/2")))
            .await
            .unwrap();

        assert_eq!(response.status, 204);
        assert_eq!(response.size, 0);
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let base = serve(echo_app()).await;
        let client = ReqwestHttpClient::with_timeout(50).unwrap();

        let err = client
            .execute(&RequestSpec::get(format!("{base}/slow")))
            .await
            .unwrap_err();

        assert_eq!(err, HttpClientError::Timeout { timeout_ms: 50 });
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ReqwestHttpClient::with_timeout(2_000).unwrap();

        let err = client
            .execute(&RequestSpec::get(format!("http://{addr}/users")))
            .await
            .unwrap_err();

        assert!(
            matches!(
                err,
                HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_)
            ),
            "{err:?}"
        );
    }
}
