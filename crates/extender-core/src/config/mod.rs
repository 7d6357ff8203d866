//! Host configuration schemas.
//!
//! Configuration is layered with the `config` crate: an optional TOML file,
//! then environment variables prefixed with `JMS_HOOKS` (nested keys are
//! separated by `__`, e.g. `JMS_HOOKS__HOOKS__TIMEOUT_MS=500`).

pub mod hooks;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::hooks::HookSettings;
use self::logging::LoggingConfig;

use crate::error::HostError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "JMS_HOOKS";

/// Root configuration of a hook host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Hook loading and invocation settings.
    #[serde(default)]
    pub hooks: HookSettings,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HostConfig {
    /// Load configuration from an optional TOML file plus the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, HostError> {
        Self::load_with_env(path, Self::environment())
    }

    /// Load configuration using an explicit environment source.
    pub fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, HostError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(HostError::configuration(format!(
                    "Config file '{}' does not exist",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(env)
            .build()
            .map_err(|e| HostError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| HostError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// The environment source used by [`HostConfig::load`].
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }
}
