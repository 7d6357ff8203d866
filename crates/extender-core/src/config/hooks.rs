//! Hook loading and invocation settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings controlling which hook is loaded and how it is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookSettings {
    /// Directory handed to the hook's `init`; normally where the JMS
    /// connectors configuration lives.
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,
    /// Shared library exporting a hook. `None` uses the default hook.
    #[serde(default)]
    pub library: Option<PathBuf>,
    /// Per-invocation timeout in milliseconds. `None` disables the timeout.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Cache decorated client IDs and subscription names per logical entity.
    #[serde(default)]
    pub memoize_names: bool,
}

impl HookSettings {
    /// The invocation timeout as a `Duration`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for HookSettings {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            library: None,
            timeout_ms: None,
            memoize_names: false,
        }
    }
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("./conf")
}
