//! Request descriptor type

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{HttpMethod, RequestBody};

/// Description of the single HTTP request a case issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Target URL (may contain `{{variable}}` placeholders)
    pub url: String,
    /// Extra request headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Request body
    #[serde(default, skip_serializing_if = "RequestBody::is_empty")]
    pub body: RequestBody,
    /// Whether a status outside 2xx/3xx fails the case on its own.
    #[serde(default = "default_fail_on_status_code")]
    pub fail_on_status_code: bool,
}

const fn default_fail_on_status_code() -> bool {
    true
}

impl RequestSpec {
    /// Creates a request with the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: RequestBody::none(),
            fail_on_status_code: true,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(HttpMethod::Post, url).with_body(RequestBody::json(body))
    }

    /// Creates a PUT request with a JSON body.
    #[must_use]
    pub fn put(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(HttpMethod::Put, url).with_body(RequestBody::json(body))
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets whether non-2xx/3xx statuses fail the case by themselves.
    #[must_use]
    pub const fn fail_on_status_code(mut self, fail: bool) -> Self {
        self.fail_on_status_code = fail;
        self
    }

    /// Validates the URL and returns parsed version if valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn parse_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }

    /// Returns true if the URL, a header or the body contains placeholders.
    #[must_use]
    pub fn has_variables(&self) -> bool {
        self.template_strings().any(|s| s.contains("{{") && s.contains("}}"))
    }

    /// Iterates every string that takes part in templating.
    pub fn template_strings(&self) -> impl Iterator<Item = &str> {
        let body: Vec<&str> = match &self.body {
            RequestBody::None => Vec::new(),
            RequestBody::Text(text) => vec![text.as_str()],
            RequestBody::Json(value) => {
                let mut out = Vec::new();
                json_strings(value, &mut out);
                out
            }
        };
        std::iter::once(self.url.as_str())
            .chain(self.headers.values().map(String::as_str))
            .chain(body)
    }
}

fn json_strings<'a>(value: &'a serde_json::Value, out: &mut Vec<&'a str>) {
    match value {
        serde_json::Value::String(s) => out.push(s),
        serde_json::Value::Array(items) => items.iter().for_each(|v| json_strings(v, out)),
        serde_json::Value::Object(map) => map.values().for_each(|v| json_strings(v, out)),
        _ => {}
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_request() {
        let req = RequestSpec::get("https://api.example.com/users");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.example.com/users");
        assert!(req.fail_on_status_code);
    }

    #[test]
    fn test_post_request_has_json_body() {
        let req = RequestSpec::post("https://api.example.com/users", json!({"name": "John Doe"}));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body.content_type(), Some("application/json"));
    }

    #[test]
    fn test_has_variables() {
        let req = RequestSpec::get("{{API_BASE_URL}}/users");
        assert!(req.has_variables());

        let req = RequestSpec::get("https://api.example.com/users");
        assert!(!req.has_variables());

        let req = RequestSpec::put("https://x/users/2", json!({"id": "{{userId}}"}));
        assert!(req.has_variables());
    }

    #[test]
    fn test_fail_on_status_code_defaults_true_when_deserialized() {
        let req: RequestSpec = serde_json::from_value(json!({
            "method": "DELETE",
            "url": "https://x/users/2"
        }))
        .expect("valid request");
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.fail_on_status_code);
        assert!(req.body.is_empty());
    }
}
