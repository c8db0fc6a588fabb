//! HTTP request body types

use serde::{Deserialize, Serialize};

/// Request body sent with a case's request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document, serialized with `application/json`
    Json(serde_json::Value),
    /// Plain text body
    Text(String),
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a JSON body.
    #[must_use]
    pub const fn json(value: serde_json::Value) -> Self {
        Self::Json(value)
    }

    /// Creates a plain text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Returns whether there is no body to send.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some("application/json"),
            Self::Text(_) => Some("text/plain"),
        }
    }

    /// Returns the serialized body bytes, if any.
    #[must_use]
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::None => None,
            Self::Json(value) => Some(value.to_string().into_bytes()),
            Self::Text(text) => Some(text.clone().into_bytes()),
        }
    }

    /// Returns a mutable reference to every string leaf of the body.
    ///
    /// Used to apply `{{variable}}` substitution to request bodies.
    pub fn strings_mut(&mut self) -> Vec<&mut String> {
        match self {
            Self::None => Vec::new(),
            Self::Text(text) => vec![text],
            Self::Json(value) => {
                let mut out = Vec::new();
                collect_strings(value, &mut out);
                out
            }
        }
    }
}

fn collect_strings<'a>(value: &'a mut serde_json::Value, out: &mut Vec<&'a mut String>) {
    match value {
        serde_json::Value::String(s) => out.push(s),
        serde_json::Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                collect_strings(item, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(json!({"name": "John Doe", "job": "QA Engineer"}));
        assert_eq!(body.content_type(), Some("application/json"));
        assert!(!body.is_empty());
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::none();
        assert!(body.is_empty());
        assert_eq!(body.content_type(), None);
        assert_eq!(body.to_bytes(), None);
    }

    #[test]
    fn test_strings_mut_visits_nested_leaves() {
        let mut body = RequestBody::json(json!({"a": "x", "b": [ "y", 1 ], "c": {"d": "z"}}));
        let mut seen: Vec<String> = body.strings_mut().into_iter().map(|s| s.clone()).collect();
        seen.sort();
        assert_eq!(seen, vec!["x", "y", "z"]);
    }
}
