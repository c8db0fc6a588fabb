//! Runner settings derived from configuration and command-line flags.

use apiprobe_application::ExecutionMode;
use apiprobe_domain::RunConfig;

use super::env_loader::ConfigLoadError;
use crate::adapters::DEFAULT_TIMEOUT_MS;

/// Variable that sets the request timeout in milliseconds.
pub const TIMEOUT_VAR: &str = "APIPROBE_TIMEOUT_MS";

/// How the runner itself behaves, as opposed to what it tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerSettings {
    /// Per-request timeout.
    pub timeout_ms: u64,
    /// Suite scheduling.
    pub mode: ExecutionMode,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            mode: ExecutionMode::Sequential,
        }
    }
}

impl RunnerSettings {
    /// Resolves settings. An explicit `timeout_ms` beats [`TIMEOUT_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError::InvalidSetting`] for a non-numeric or zero timeout.
    pub fn resolve(
        config: &RunConfig,
        timeout_ms: Option<u64>,
        parallel: bool,
    ) -> Result<Self, ConfigLoadError> {
        let timeout_ms = match (timeout_ms, config.get(TIMEOUT_VAR)) {
            (Some(ms), _) => ms,
            (None, Some(raw)) => raw.trim().parse::<u64>().map_err(|_| invalid_timeout(raw))?,
            (None, None) => DEFAULT_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            return Err(invalid_timeout("0"));
        }

        Ok(Self {
            timeout_ms,
            mode: if parallel {
                ExecutionMode::Parallel
            } else {
                ExecutionMode::Sequential
            },
        })
    }
}

fn invalid_timeout(raw: &str) -> ConfigLoadError {
    ConfigLoadError::InvalidSetting {
        name: TIMEOUT_VAR.to_string(),
        value: raw.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = RunnerSettings::resolve(&RunConfig::new(), None, false).unwrap();
        assert_eq!(settings, RunnerSettings::default());
        assert_eq!(settings.timeout_ms, 30_000);
    }

    #[test]
    fn test_env_timeout_and_flag_precedence() {
        let config = RunConfig::new().with(TIMEOUT_VAR, "1500");
        assert_eq!(RunnerSettings::resolve(&config, None, false).unwrap().timeout_ms, 1500);
        assert_eq!(RunnerSettings::resolve(&config, Some(250), true).unwrap().timeout_ms, 250);
        assert_eq!(
            RunnerSettings::resolve(&config, None, true).unwrap().mode,
            ExecutionMode::Parallel
        );
    }

    #[test]
    fn test_invalid_timeout() {
        let config = RunConfig::new().with(TIMEOUT_VAR, "soon");
        assert!(matches!(
            RunnerSettings::resolve(&config, None, false),
            Err(ConfigLoadError::InvalidSetting { .. })
        ));
        assert!(RunnerSettings::resolve(&RunConfig::new(), Some(0), false).is_err());
    }
}
