//! Outcome output formatting.

use extender_core::error::HostError;
use extender_hooks::EventOutcome;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One compact JSON object per line
    #[default]
    Json,
    /// Indented JSON
    Pretty,
}

/// Render one outcome in the selected format.
pub fn render(outcome: &EventOutcome, format: OutputFormat) -> Result<String, HostError> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(outcome)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(outcome)?,
    };
    Ok(text)
}

/// Print outcomes to stdout, one per line.
pub fn print_outcomes(outcomes: &[EventOutcome], format: OutputFormat) -> Result<(), HostError> {
    for outcome in outcomes {
        println!("{}", render(outcome, format)?);
    }
    Ok(())
}
