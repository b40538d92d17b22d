//! Output formatters for scorecards.

pub mod ci;
pub mod human;
pub mod json;

use crate::scorecard::Scorecard;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Grouped, coloured report for terminals.
    #[default]
    Human,
    /// One line per finding, for CI logs.
    Ci,
    /// The full scorecard as JSON.
    Json,
}

/// Format a scorecard to a string.
pub fn format_scorecard(scorecard: &Scorecard, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format(scorecard),
        OutputFormat::Ci => ci::format(scorecard),
        OutputFormat::Json => json::format(scorecard),
    }
}

/// Format and print a scorecard.
pub fn print_scorecard(scorecard: &Scorecard, format: OutputFormat) {
    print!("{}", format_scorecard(scorecard, format));
}
