//! Human-readable formatter.

use crate::scorecard::{Outcome, ScoredObject, Scorecard};
use crate::types::Grade;
use colored::Colorize;

/// Format a scorecard grouped by object, showing only findings.
///
/// Passing and skipped outcomes are counted in the summary but not listed.
pub fn format(scorecard: &Scorecard) -> String {
    let mut output = String::new();
    let mut critical = 0;
    let mut warnings = 0;

    for object in scorecard {
        output.push_str(&object_header(object));

        for outcome in object.outcomes.iter().filter(|o| !o.skipped) {
            match outcome.grade {
                Grade::Critical => critical += 1,
                Grade::Warning => warnings += 1,
                _ => continue,
            }
            output.push_str(&format_outcome(outcome));
        }
    }

    if scorecard.is_empty() {
        output.push_str("No objects were scored.\n");
    } else {
        output.push_str(&format!(
            "\n{} object(s) scored: {} critical, {} warning(s)\n",
            scorecard.len(),
            critical,
            warnings
        ));
    }

    output
}

fn object_header(object: &ScoredObject) -> String {
    let marker = match object.worst_grade() {
        Some(Grade::Critical) => "💥".to_string(),
        Some(Grade::Warning) => "🤔".to_string(),
        _ => "✅".to_string(),
    };
    format!("{} {}\n", object.display_name().bold(), marker)
}

fn format_outcome(outcome: &Outcome) -> String {
    let label = format!("[{}]", outcome.grade);
    let label = match outcome.grade {
        Grade::Critical => label.red().bold(),
        Grade::Warning => label.yellow(),
        _ => label.normal(),
    };

    let mut output = format!("    {} {}\n", label, outcome.check.name);
    for comment in &outcome.comments {
        if comment.path.is_empty() {
            output.push_str(&format!("        · {}\n", comment.summary));
        } else {
            output.push_str(&format!("        · {} -> {}\n", comment.path, comment.summary));
        }
        if !comment.description.is_empty() {
            output.push_str(&format!("            {}\n", comment.description.dimmed()));
        }
    }
    output
}
