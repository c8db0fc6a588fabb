//! HTTP response types
//!
//! Contains types for representing HTTP responses including
//! status codes, headers, body, and timing information.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 3xx redirection status.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Returns true if this is any error status (4xx or 5xx).
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.0 >= 400 && self.0 < 600
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// HTTP response received for a case's request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,
    /// Response headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Response body as text.
    pub body: String,
    /// Response time.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// Response size in bytes.
    pub size: usize,
    /// Content-Type header value (extracted for convenience).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: &[u8],
        duration: Duration,
    ) -> Self {
        let status_code = status.into();
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());

        Self {
            status: status_code.as_u16(),
            status_text: status_code.reason_phrase().to_string(),
            headers,
            body: String::from_utf8_lossy(body).into_owned(),
            duration,
            size: body.len(),
            content_type,
        }
    }

    /// Creates a response with a JSON body and no headers beyond Content-Type.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, body.to_string().as_bytes(), Duration::ZERO)
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Parses the body as JSON.
    ///
    /// An empty body parses as `null`, as a 204 response carries none.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the body is not valid JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.body)
    }

    /// Returns a human-readable duration string (e.g., "124 ms").
    #[must_use]
    pub fn duration_display(&self) -> String {
        let millis = self.duration.as_millis();
        if millis < 1000 {
            format!("{millis} ms")
        } else {
            format!("{:.2} s", self.duration.as_secs_f64())
        }
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
