//! Values captured from one case's response for later cases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-suite fixture store. Never shared across suites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixtures {
    values: BTreeMap<String, serde_json::Value>,
}

impl Fixtures {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.values.insert(name.into(), value);
    }

    /// Returns the raw captured value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.values.get(name)
    }

    /// Returns the value as template text: strings verbatim, others as JSON.
    #[must_use]
    pub fn render(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Number of captured values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
