//! NetworkPolicy coverage checks.

use crate::checks::{Evaluation, NetworkPolicyCheck, PodTemplateCheck};
use crate::context::{NetworkPolicy, PodTemplate, PolicyType, ResourceIndex};
use crate::extract::selector_matches;
use crate::types::Grade;

/// Every pod should be selected by an Ingress and an Egress policy.
pub struct PodHasNetworkPolicyCheck;

impl PodTemplateCheck for PodHasNetworkPolicyCheck {
    fn evaluate(&self, template: &PodTemplate, index: &ResourceIndex) -> Evaluation {
        let mut has_ingress = false;
        let mut has_egress = false;

        for policy in index.network_policies_in(&template.namespace) {
            if !selector_matches(&policy.pod_selector, &template.labels) {
                continue;
            }
            has_ingress |= policy.covers(PolicyType::Ingress);
            has_egress |= policy.covers(PolicyType::Egress);
        }

        match (has_ingress, has_egress) {
            (true, true) => Evaluation::ok(),
            (false, true) => Evaluation::new(Grade::Warning).with_comment(
                "",
                "The pod does not have a matching ingress network policy",
                "Add a ingress policy to the pods NetworkPolicy",
            ),
            (true, false) => Evaluation::new(Grade::Warning).with_comment(
                "",
                "The pod does not have a matching egress network policy",
                "Add a egress policy to the pods NetworkPolicy",
            ),
            (false, false) => Evaluation::new(Grade::Critical).with_comment(
                "",
                "The pod does not have a matching network policy",
                "Create a NetworkPolicy that targets this pod",
            ),
        }
    }
}

/// A policy should select at least one pod in its namespace.
pub struct NetworkPolicyTargetsPodCheck;

impl NetworkPolicyCheck for NetworkPolicyTargetsPodCheck {
    fn evaluate(&self, policy: &NetworkPolicy, index: &ResourceIndex) -> Evaluation {
        let has_match = index
            .pod_templates_in(&policy.meta.namespace)
            .any(|t| selector_matches(&policy.pod_selector, &t.labels));

        if has_match {
            Evaluation::ok()
        } else {
            Evaluation::new(Grade::Critical).with_comment(
                "",
                "The NetworkPolicys selector doesn't match any pods",
                "",
            )
        }
    }
}
