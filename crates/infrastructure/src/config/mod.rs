//! Run configuration loading.

mod env_loader;
mod settings;

pub use env_loader::{ConfigLoadError, ENV_PREFIX, EnvConfigLoader};
pub use settings::{RunnerSettings, TIMEOUT_VAR};
