//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use extender_core::config::HostConfig;
use extender_core::error::HostError;

use crate::output::OutputFormat;

/// Replays scripted JMS Extender events against a hook.
#[derive(Debug, Parser)]
#[command(name = "hook-harness", version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shared library exporting the hook (overrides `hooks.library`)
    #[arg(short, long)]
    pub library: Option<PathBuf>,

    /// JSON array of host events; read from stdin when omitted
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Outcome output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

impl Cli {
    /// Loads configuration and applies command-line overrides.
    pub fn load_config(&self) -> Result<HostConfig, HostError> {
        let mut config = HostConfig::load(self.config.as_deref())?;
        if let Some(library) = &self.library {
            config.hooks.library = Some(library.clone());
        }
        Ok(config)
    }
}
