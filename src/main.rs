//! Hook harness: loads a JMS Extender hook and replays scripted host events
//! against it.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use extender_core::config::logging::LoggingConfig;

mod cli;
mod harness;
mod output;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = harness::run(config, cli.scenario.as_deref(), cli.format).await {
        tracing::error!("Harness error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr so stdout carries only outcomes.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
