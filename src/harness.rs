//! Wires configuration, hook loading, and the dispatcher together.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use extender_core::config::HostConfig;
use extender_core::config::hooks::HookSettings;
use extender_core::error::HostError;
use extender_hooks::{
    DefaultHook, DispatchSettings, DynamicLoader, HookDispatcher, HostEvent, JmsExtenderHook,
    MemoizedNames,
};

use crate::output::{self, OutputFormat};

/// Builds the hook, initializes it, replays the scenario, and prints outcomes.
pub async fn run(
    config: HostConfig,
    scenario: Option<&Path>,
    format: OutputFormat,
) -> Result<(), HostError> {
    info!("Starting hook harness v{}", env!("CARGO_PKG_VERSION"));

    let mut loader = DynamicLoader::new();
    let hook = build_hook(&config.hooks, &mut loader)?;
    let dispatcher = HookDispatcher::new(
        hook,
        DispatchSettings {
            timeout: config.hooks.timeout(),
        },
    );

    dispatcher.init(&config.hooks.config_dir).await?;

    let events = read_scenario(scenario)?;
    info!(events = events.len(), "Replaying scenario");

    let outcomes = dispatcher.replay_all(events).await;
    output::print_outcomes(&outcomes, format)
}

/// Loads the configured library, or falls back to the pass-through hook.
pub fn build_hook(
    settings: &HookSettings,
    loader: &mut DynamicLoader,
) -> Result<Arc<dyn JmsExtenderHook>, HostError> {
    let hook: Arc<dyn JmsExtenderHook> = match &settings.library {
        // SAFETY: the operator chose this library; the loader checks its ABI version.
        Some(path) => unsafe { loader.load_from_path(path)? },
        None => {
            info!("No hook library configured, using the pass-through hook");
            Arc::new(DefaultHook)
        }
    };

    if settings.memoize_names {
        Ok(Arc::new(MemoizedNames::new(hook)))
    } else {
        Ok(hook)
    }
}

/// Reads a JSON array of host events from a file, or stdin when no path is given.
pub fn read_scenario(path: Option<&Path>) -> Result<Vec<HostEvent>, HostError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            HostError::configuration(format!(
                "Cannot read scenario '{}': {}",
                path.display(),
                e
            ))
        })?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    Ok(serde_json::from_str(&text)?)
}
