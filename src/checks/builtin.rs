//! Built-in checks, in registration order.

use crate::checks::container::{
    ImagePullPolicyCheck, ImageTagCheck, RequestsEqualLimitsCheck, ResourcesCheck,
};
use crate::checks::disruptionbudget::HasDisruptionBudgetCheck;
use crate::checks::networkpolicy::{NetworkPolicyTargetsPodCheck, PodHasNetworkPolicyCheck};
use crate::checks::probes::ProbesCheck;
use crate::checks::security::{SeccompProfileCheck, SecurityContextCheck};
use crate::checks::service::ServiceTargetsPodCheck;
use crate::checks::stable::StableVersionCheck;
use crate::checks::{Check, CheckFunc};
use crate::config::ScoreConfig;
use crate::types::WorkloadKind;

/// Get all built-in checks configured for a run.
pub fn builtin_checks(config: &ScoreConfig) -> Vec<Check> {
    let require_cpu_limit = !config.ignore_container_cpu_limit_requirement;
    let require_memory_limit = !config.ignore_container_memory_limit_requirement;

    vec![
        Check::new(
            "stable-version",
            "Stable version",
            "Checks if the object is using a deprecated apiVersion",
            CheckFunc::Metadata(Box::new(StableVersionCheck)),
        ),
        // Container checks
        Check::new(
            "container-resources",
            "Container Resources",
            "Makes sure that all pods have resource limits and requests set",
            CheckFunc::PodTemplate(Box::new(ResourcesCheck {
                require_cpu_limit,
                require_memory_limit,
            })),
        ),
        Check::new(
            "container-resource-requests-equal-limits",
            "Container Resource Requests Equal Limits",
            "Makes sure that all pods have the same requests as limits on resources set",
            CheckFunc::PodTemplate(Box::new(RequestsEqualLimitsCheck {
                require_cpu: require_cpu_limit,
            })),
        )
        .optional(),
        Check::new(
            "container-image-tag",
            "Container Image Tag",
            "Makes sure that a explicit non-latest tag is used",
            CheckFunc::PodTemplate(Box::new(ImageTagCheck)),
        ),
        Check::new(
            "container-image-pull-policy",
            "Container Image Pull Policy",
            "Makes sure that the pullPolicy is set to Always",
            CheckFunc::PodTemplate(Box::new(ImagePullPolicyCheck)),
        ),
        // Pod checks
        Check::new(
            "pod-networkpolicy",
            "Pod NetworkPolicy",
            "Makes sure that all Pods are targeted by a NetworkPolicy",
            CheckFunc::PodTemplate(Box::new(PodHasNetworkPolicyCheck)),
        ),
        Check::new(
            "pod-probes",
            "Pod Probes",
            "Makes sure that all Pods have safe probe configurations",
            CheckFunc::PodTemplate(Box::new(ProbesCheck)),
        ),
        // Security checks
        Check::new(
            "container-security-context",
            "Container Security Context",
            "Makes sure that all pods have good securityContexts configured",
            CheckFunc::PodTemplate(Box::new(SecurityContextCheck)),
        ),
        Check::new(
            "container-seccomp-profile",
            "Container Seccomp Profile",
            "Makes sure that all pods have a seccomp policy configured",
            CheckFunc::PodTemplate(Box::new(SeccompProfileCheck)),
        )
        .optional(),
        // Relationship checks
        Check::new(
            "service-targets-pod",
            "Service Targets Pod",
            "Makes sure that all Services targets a Pod",
            CheckFunc::Service(Box::new(ServiceTargetsPodCheck)),
        ),
        Check::new(
            "networkpolicy-targets-pod",
            "NetworkPolicy targets Pod",
            "Makes sure that all NetworkPolicies targets at least one Pod",
            CheckFunc::NetworkPolicy(Box::new(NetworkPolicyTargetsPodCheck)),
        ),
        Check::new(
            "statefulset-has-poddisruptionbudget",
            "StatefulSet has PodDisruptionBudget",
            "Makes sure that all StatefulSets are targeted by a PDB",
            CheckFunc::Workload(WorkloadKind::StatefulSet, Box::new(HasDisruptionBudgetCheck)),
        ),
        Check::new(
            "deployment-has-poddisruptionbudget",
            "Deployment has PodDisruptionBudget",
            "Makes sure that all Deployments are targeted by a PDB",
            CheckFunc::Workload(WorkloadKind::Deployment, Box::new(HasDisruptionBudgetCheck)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TargetShape;

    #[test]
    fn test_registration_order_and_targets() {
        let checks = builtin_checks(&ScoreConfig::default());
        let ids: Vec<&str> = checks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"stable-version"));
        assert_eq!(ids.last(), Some(&"deployment-has-poddisruptionbudget"));

        let target = |id: &str| checks.iter().find(|c| c.id == id).map(|c| c.target());
        assert_eq!(target("stable-version"), Some(TargetShape::Metadata));
        assert_eq!(target("pod-probes"), Some(TargetShape::PodTemplate));
        assert_eq!(target("service-targets-pod"), Some(TargetShape::Service));
        assert_eq!(
            target("networkpolicy-targets-pod"),
            Some(TargetShape::NetworkPolicy)
        );
        assert_eq!(
            target("statefulset-has-poddisruptionbudget"),
            Some(TargetShape::Workload(WorkloadKind::StatefulSet))
        );
    }
}
