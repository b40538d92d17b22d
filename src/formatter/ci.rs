//! Line-oriented formatter for CI logs.
//!
//! Every comment becomes one line; outcomes without comments get a single
//! line naming the check.

use crate::scorecard::Scorecard;

/// Format a scorecard as `[GRADE] name Kind: (path) summary` lines.
pub fn format(scorecard: &Scorecard) -> String {
    let mut output = String::new();

    for object in scorecard {
        let prefix = format!("{} {}", object.object_meta.name, object.type_meta.kind);

        for outcome in &object.outcomes {
            let label = if outcome.skipped {
                "SKIPPED"
            } else {
                outcome.grade.as_str()
            };

            if outcome.comments.is_empty() {
                output.push_str(&format!("[{}] {}: {}\n", label, prefix, outcome.check.name));
                continue;
            }

            for comment in &outcome.comments {
                if comment.path.is_empty() {
                    output.push_str(&format!("[{}] {}: {}\n", label, prefix, comment.summary));
                } else {
                    output.push_str(&format!(
                        "[{}] {}: ({}) {}\n",
                        label, prefix, comment.path, comment.summary
                    ));
                }
            }
        }
    }

    output
}
