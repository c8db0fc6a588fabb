//! Run configuration values.
//!
//! A [`RunConfig`] is an immutable snapshot of named configuration values
//! (base URLs, expected constants) taken once at start-up and passed
//! explicitly to suite execution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A required configuration value is not set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("configuration value '{name}' is not set")]
pub struct ConfigMissing {
    /// Name of the missing value.
    pub name: String,
}

/// Named configuration values available to a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    values: BTreeMap<String, String>,
}

impl RunConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of [`RunConfig::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns true if the value is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Looks up a required value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigMissing`] if the value is not set.
    pub fn resolve(&self, name: &str) -> Result<&str, ConfigMissing> {
        self.get(name).ok_or_else(|| ConfigMissing {
            name: name.to_string(),
        })
    }

    /// Looks up a value, falling back to the caller's default.
    #[must_use]
    pub fn resolve_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Looks up a required value and interprets it as a JSON value.
    ///
    /// Numbers and booleans are parsed; anything else stays a string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigMissing`] if the value is not set.
    pub fn resolve_json(&self, name: &str) -> Result<serde_json::Value, ConfigMissing> {
        let raw = self.resolve(name)?;
        Ok(parse_scalar(raw))
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all names and values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RunConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (k, v) in iter {
            config.set(k, v);
        }
        config
    }
}

fn parse_scalar(raw: &str) -> serde_json::Value {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return serde_json::Value::from(n);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return serde_json::Value::Number(n);
        }
    }
    match trimmed {
        "true" => serde_json::Value::Bool(true),
        "false" => serde_json::Value::Bool(false),
        _ => serde_json::Value::String(raw.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_present() {
        let config = RunConfig::new().with("API_BASE_URL", "https://example.com");
        assert_eq!(config.resolve("API_BASE_URL").unwrap(), "https://example.com");
    }

    #[test]
    fn test_resolve_missing() {
        let config = RunConfig::new();
        let err = config.resolve("REPO_VARIABLE").unwrap_err();
        assert_eq!(err.name, "REPO_VARIABLE");
        assert_eq!(
            err.to_string(),
            "configuration value 'REPO_VARIABLE' is not set"
        );
    }

    #[test]
    fn test_resolve_or_default() {
        let config = RunConfig::new();
        assert_eq!(config.resolve_or("MISSING", "fallback"), "fallback");
    }

    #[test]
    fn test_resolve_json_numeric() {
        let config = RunConfig::new().with("REPO_VARIABLE", "31");
        assert_eq!(config.resolve_json("REPO_VARIABLE").unwrap(), serde_json::json!(31));

        let config = RunConfig::new().with("RATIO", "0.5");
        assert_eq!(config.resolve_json("RATIO").unwrap(), serde_json::json!(0.5));

        let config = RunConfig::new().with("NAME", "thirty-one");
        assert_eq!(
            config.resolve_json("NAME").unwrap(),
            serde_json::json!("thirty-one")
        );
    }

    #[test]
    fn test_from_iter_last_wins() {
        let config: RunConfig = vec![("A", "1"), ("A", "2")].into_iter().collect();
        assert_eq!(config.get("A"), Some("2"));
        assert_eq!(config.len(), 1);
    }
}
