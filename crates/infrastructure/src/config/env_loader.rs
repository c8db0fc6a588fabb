//! Builds a [`RunConfig`] from environment pairs and an optional env file.
//!
//! Precedence, lowest first:
//! 1. values from the JSON env file
//! 2. process environment variables
//! 3. `APIPROBE_`-prefixed variables, registered under the stripped name

use std::path::{Path, PathBuf};

use apiprobe_domain::RunConfig;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Prefix for variables that override their unprefixed counterpart.
pub const ENV_PREFIX: &str = "APIPROBE_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The env file could not be read.
    #[error("failed to read env file {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The env file is not valid JSON.
    #[error("env file {path} is not valid JSON: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The env file is not a flat object of scalars.
    #[error("env file {path}: {reason}")]
    InvalidShape {
        /// File path.
        path: PathBuf,
        /// What is wrong.
        reason: String,
    },

    /// A runner setting has an unusable value.
    #[error("invalid value for {name}: '{value}'")]
    InvalidSetting {
        /// Setting name.
        name: String,
        /// Raw value.
        value: String,
    },
}

/// Loader for [`RunConfig`] snapshots.
#[derive(Debug, Clone)]
pub struct EnvConfigLoader {
    prefix: String,
}

impl Default for EnvConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvConfigLoader {
    /// Creates a loader using [`ENV_PREFIX`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(ENV_PREFIX)
    }

    /// Creates a loader with a custom override prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Builds a configuration from environment pairs only.
    #[must_use]
    pub fn from_vars<I, K, V>(&self, vars: I) -> RunConfig
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut config = RunConfig::new();
        self.apply_vars(&mut config, vars);
        config
    }

    /// Builds a configuration from environment pairs layered over an env file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] if the file cannot be read or parsed.
    pub async fn load<I, K, V>(
        &self,
        vars: I,
        env_file: Option<&Path>,
    ) -> Result<RunConfig, ConfigLoadError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut config = match env_file {
            Some(path) => Self::load_file(path).await?,
            None => RunConfig::new(),
        };
        self.apply_vars(&mut config, vars);
        debug!(values = config.len(), "configuration loaded");
        Ok(config)
    }

    /// Reads a flat JSON object of string, number or boolean values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] if the file is unreadable, not JSON, or
    /// not a flat object of scalars.
    pub async fn load_file(path: &Path) -> Result<RunConfig, ConfigLoadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ConfigLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let json: Value =
            serde_json::from_slice(&bytes).map_err(|source| ConfigLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let Value::Object(map) = json else {
            return Err(ConfigLoadError::InvalidShape {
                path: path.to_path_buf(),
                reason: "top level must be an object".to_string(),
            });
        };

        map.into_iter()
            .map(|(name, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(ConfigLoadError::InvalidShape {
                            path: path.to_path_buf(),
                            reason: format!("'{name}' must be a string, number or boolean, got {other}"),
                        });
                    }
                };
                Ok((name, text))
            })
            .collect()
    }

    fn apply_vars<I, K, V>(&self, config: &mut RunConfig, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut overrides = Vec::new();
        for (name, value) in vars {
            let name = name.into();
            let value = value.into();
            if let Some(stripped) = name.strip_prefix(&self.prefix)
                && !stripped.is_empty()
            {
                overrides.push((stripped.to_string(), value.clone()));
            }
            config.set(name, value);
        }
        for (name, value) in overrides {
            config.set(name, value);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_plain_vars() {
        let config = EnvConfigLoader::new().from_vars([
            ("API_BASE_URL", "https://jsonplaceholder.typicode.com"),
            ("REPO_VARIABLE", "31"),
        ]);
        assert_eq!(
            config.get("API_BASE_URL"),
            Some("https://jsonplaceholder.typicode.com")
        );
        assert_eq!(config.resolve_json("REPO_VARIABLE").unwrap(), serde_json::json!(31));
    }

    #[test]
    fn test_prefixed_var_wins_regardless_of_order() {
        let loader = EnvConfigLoader::new();

        let config = loader.from_vars([("APIPROBE_API_BASE_URL", "https://a"), ("API_BASE_URL", "https://b")]);
        assert_eq!(config.get("API_BASE_URL"), Some("https://a"));
        assert_eq!(config.get("APIPROBE_API_BASE_URL"), Some("https://a"));

        let config = loader.from_vars([("API_BASE_URL", "https://b"), ("APIPROBE_API_BASE_URL", "https://a")]);
        assert_eq!(config.get("API_BASE_URL"), Some("https://a"));
    }

    #[test]
    fn test_bare_prefix_is_ignored() {
        let config = EnvConfigLoader::new().from_vars([("APIPROBE_", "x")]);
        assert_eq!(config.len(), 1);
        assert!(!config.contains(""));
    }

    #[tokio::test]
    async fn test_env_file_below_process_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"API_BASE_URL": "https://from-file", "REPO_VARIABLE": 31, "VERBOSE": true}}"#
        )
        .unwrap();

        let config = EnvConfigLoader::new()
            .load([("API_BASE_URL", "https://from-env")], Some(file.path()))
            .await
            .unwrap();

        assert_eq!(config.get("API_BASE_URL"), Some("https://from-env"));
        assert_eq!(config.get("REPO_VARIABLE"), Some("31"));
        assert_eq!(config.get("VERBOSE"), Some("true"));
    }

    #[tokio::test]
    async fn test_env_file_rejects_nested_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"API": {{"url": "x"}}}}"#).unwrap();

        let err = EnvConfigLoader::load_file(file.path()).await.unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidShape { .. }));
    }

    #[tokio::test]
    async fn test_env_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = EnvConfigLoader::load_file(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_env_file_not_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "API_BASE_URL=https://x").unwrap();

        let err = EnvConfigLoader::load_file(file.path()).await.unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
    }
}
