//! PodDisruptionBudget coverage for Deployments and StatefulSets.

use crate::checks::{Evaluation, WorkloadCheck};
use crate::context::{ResourceIndex, Workload};
use crate::extract::selector_matches;
use crate::types::Grade;

/// A workload should be protected by at least one budget in its namespace.
pub struct HasDisruptionBudgetCheck;

impl WorkloadCheck for HasDisruptionBudgetCheck {
    fn evaluate(&self, workload: &Workload, index: &ResourceIndex) -> Evaluation {
        let has_match = index
            .disruption_budgets_in(&workload.meta.namespace)
            .filter_map(|budget| budget.selector.as_ref())
            .any(|selector| selector_matches(selector, &workload.template.labels));

        if has_match {
            Evaluation::ok()
        } else {
            Evaluation::new(Grade::Critical).with_comment(
                "",
                "No matching PodDisruptionBudget was found",
                "It's recommended to define a PodDisruptionBudget to avoid unexpected downtime during Kubernetes maintenance operations, such as when draining a node.",
            )
        }
    }
}
