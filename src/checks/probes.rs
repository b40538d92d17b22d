//! Readiness and liveness probe checks.

use crate::checks::service::service_targets;
use crate::checks::{Evaluation, PodTemplateCheck};
use crate::context::{PodTemplate, ResourceIndex};
use crate::extract::container::all_containers;
use crate::types::Grade;

const PROBES_README: &str = "More information: https://github.com/zegl/kube-score/blob/master/README_PROBES.md";

/// Pods behind a service need distinct readiness and liveness probes.
pub struct ProbesCheck;

impl PodTemplateCheck for ProbesCheck {
    fn evaluate(&self, template: &PodTemplate, index: &ResourceIndex) -> Evaluation {
        let targeted = index
            .services_in(&template.namespace)
            .any(|s| service_targets(s, template));
        if !targeted {
            return Evaluation::ok().with_comment(
                "",
                "The pod is not targeted by a service, skipping probe checks.",
                "",
            );
        }

        let mut has_readiness = false;
        let mut has_liveness = false;
        let mut identical = false;
        for container in all_containers(&template.spec) {
            has_readiness |= container.readiness_probe.is_some();
            has_liveness |= container.liveness_probe.is_some();
            if let (Some(readiness), Some(liveness)) =
                (&container.readiness_probe, &container.liveness_probe)
            {
                identical |= readiness == liveness;
            }
        }

        if !has_readiness {
            return Evaluation::new(Grade::Critical).with_comment(
                "",
                "Container is missing a readinessProbe",
                format!(
                    "A readinessProbe should be used to indicate when the service is ready to receive traffic. Without it, the Pod is risking to receive traffic before it has booted. It is also used during rollouts, and can prevent downtime if a new version of the application is failing. {}",
                    PROBES_README
                ),
            );
        }
        if !has_liveness {
            return Evaluation::new(Grade::Critical).with_comment(
                "",
                "Container is missing a livenessProbe",
                format!(
                    "A livenessProbe can be used to restart the container if it's deadlocked or has crashed without exiting. It is only recommended to use a livenessProbe if you know what you are doing. {}",
                    PROBES_README
                ),
            );
        }
        if identical {
            return Evaluation::new(Grade::Critical).with_comment(
                "",
                "Container has the same readiness and liveness probe",
                format!(
                    "Using the same probe for liveness and readiness is very likely dangerous. Generally it's better to use a dedicated readiness probe and no liveness probe at all. {}",
                    PROBES_README
                ),
            );
        }

        Evaluation::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::decode::decode;
    use crate::context::Resource;
    use crate::parser::parse_documents;

    fn evaluate(yaml: &str) -> Evaluation {
        let resources: Vec<Resource> = parse_documents("test.yaml", yaml.as_bytes())
            .unwrap()
            .iter()
            .filter_map(|d| decode(d).unwrap())
            .collect();
        let index = ResourceIndex::build(resources);
        let template = index.pods().next().map(|p| &p.template).unwrap();
        ProbesCheck.evaluate(template, &index)
    }

    const SERVICE: &str = "---\napiVersion: v1\nkind: Service\nmetadata:\n  name: web\nspec:\n  selector:\n    app: web\n";

    fn pod(probes: &str) -> String {
        format!(
            "apiVersion: v1\nkind: Pod\nmetadata:\n  name: web\n  labels:\n    app: web\nspec:\n  containers:\n  - name: web\n{}",
            probes
        )
    }

    #[test]
    fn test_untargeted_pod_is_ok_with_comment() {
        let evaluation = evaluate(&pod(""));
        assert_eq!(evaluation.grade, Grade::AllOK);
        assert_eq!(
            evaluation.comments[0].summary,
            "The pod is not targeted by a service, skipping probe checks."
        );
    }

    #[test]
    fn test_missing_readiness_probe() {
        let evaluation = evaluate(&format!("{}{}", pod(""), SERVICE));
        assert_eq!(evaluation.grade, Grade::Critical);
        assert_eq!(evaluation.comments[0].summary, "Container is missing a readinessProbe");
    }

    #[test]
    fn test_missing_liveness_probe() {
        let probes = "    readinessProbe:\n      httpGet:\n        path: /ready\n        port: 8080\n";
        let evaluation = evaluate(&format!("{}{}", pod(probes), SERVICE));
        assert_eq!(evaluation.grade, Grade::Critical);
        assert_eq!(evaluation.comments[0].summary, "Container is missing a livenessProbe");
    }

    #[test]
    fn test_identical_probes() {
        let probes = "    readinessProbe:\n      httpGet:\n        path: /health\n        port: 8080\n    livenessProbe:\n      httpGet:\n        path: /health\n        port: 8080\n";
        let evaluation = evaluate(&format!("{}{}", pod(probes), SERVICE));
        assert_eq!(evaluation.grade, Grade::Critical);
        assert_eq!(
            evaluation.comments[0].summary,
            "Container has the same readiness and liveness probe"
        );
    }

    #[test]
    fn test_distinct_probes() {
        let probes = "    readinessProbe:\n      httpGet:\n        path: /ready\n        port: 8080\n    livenessProbe:\n      httpGet:\n        path: /live\n        port: 8080\n";
        let evaluation = evaluate(&format!("{}{}", pod(probes), SERVICE));
        assert_eq!(evaluation, Evaluation::ok());
    }
}
