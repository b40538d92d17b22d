//! Container security context and seccomp checks.

use crate::checks::{Evaluation, PodTemplateCheck};
use crate::context::{PodTemplate, ResourceIndex};
use crate::extract::container::all_containers;
use crate::types::Grade;

/// User and group ids below this value may collide with host accounts.
const MIN_ID: i64 = 10000;

/// Pod annotation that sets a default seccomp profile for all containers.
pub const SECCOMP_ANNOTATION: &str = "seccomp.security.alpha.kubernetes.io/defaultProfileName";

/// Containers must run unprivileged, read-only, and as a high user and group id.
///
/// `runAsUser`, `runAsGroup` and `runAsNonRoot` fall back to the pod security
/// context when the container leaves them unset.
pub struct SecurityContextCheck;

impl PodTemplateCheck for SecurityContextCheck {
    fn evaluate(&self, template: &PodTemplate, _index: &ResourceIndex) -> Evaluation {
        let mut evaluation = Evaluation::ok();
        let pod_context = template.spec.security_context.as_ref();

        for container in all_containers(&template.spec) {
            let Some(context) = &container.security_context else {
                evaluation.add_comment(
                    &container.name,
                    "Container has no configured security context",
                    "Set securityContext to run the container in a more secure context.",
                );
                continue;
            };

            let run_as_user = context
                .run_as_user
                .or_else(|| pod_context.and_then(|p| p.run_as_user));
            let run_as_group = context
                .run_as_group
                .or_else(|| pod_context.and_then(|p| p.run_as_group));

            if context.privileged == Some(true) {
                evaluation.add_comment(
                    &container.name,
                    "The container is privileged",
                    "Set securityContext.privileged to false. Privileged containers can access all devices on the host, and grants almost the same access as non-containerized processes on the host.",
                );
            }
            if context.read_only_root_filesystem != Some(true) {
                evaluation.add_comment(
                    &container.name,
                    "The pod has a container with a writable root filesystem",
                    "Set securityContext.readOnlyRootFilesystem to true",
                );
            }
            if run_as_user.is_none_or(|uid| uid < MIN_ID) {
                evaluation.add_comment(
                    &container.name,
                    "The container is running with a low user ID",
                    "A userid above 10 000 is recommended to avoid conflicts with the host. Set securityContext.runAsUser to a value > 10000",
                );
            }
            if run_as_group.is_none_or(|gid| gid < MIN_ID) {
                evaluation.add_comment(
                    &container.name,
                    "The container running with a low group ID",
                    "A groupid above 10 000 is recommended to avoid conflicts with the host. Set securityContext.runAsGroup to a value > 10000",
                );
            }
        }

        if !evaluation.comments.is_empty() {
            evaluation.grade = Grade::Critical;
        }
        evaluation
    }
}

/// The pod should run its containers under a seccomp profile.
pub struct SeccompProfileCheck;

impl PodTemplateCheck for SeccompProfileCheck {
    fn evaluate(&self, template: &PodTemplate, _index: &ResourceIndex) -> Evaluation {
        let has_annotation = template.annotations.contains_key(SECCOMP_ANNOTATION);
        let has_profile = template
            .spec
            .security_context
            .as_ref()
            .is_some_and(|p| p.seccomp_profile.is_some());

        if has_annotation || has_profile {
            return Evaluation::ok();
        }

        Evaluation::new(Grade::Warning).with_comment(
            "",
            "The pod has not configured Seccomp for its containers",
            "Running containers with Seccomp is recommended to reduce the kernel attack surface",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::core_v1::{
        Container, PodSecurityContext, PodSpec, SeccompProfile, SecurityContext,
    };
    use std::collections::BTreeMap;

    fn template(
        context: Option<SecurityContext>,
        pod_context: Option<PodSecurityContext>,
    ) -> PodTemplate {
        PodTemplate {
            namespace: "default".to_string(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            spec: PodSpec {
                containers: vec![Container {
                    name: "foobar".to_string(),
                    security_context: context,
                    ..Default::default()
                }],
                security_context: pod_context,
                ..Default::default()
            },
        }
    }

    fn evaluate(
        context: Option<SecurityContext>,
        pod_context: Option<PodSecurityContext>,
    ) -> Evaluation {
        SecurityContextCheck.evaluate(&template(context, pod_context), &ResourceIndex::default())
    }

    fn has_summary(evaluation: &Evaluation, summary: &str) -> bool {
        evaluation
            .comments
            .iter()
            .any(|c| c.path == "foobar" && c.summary == summary)
    }

    #[test]
    fn test_no_security_context() {
        let evaluation = evaluate(None, None);
        assert_eq!(evaluation.grade, Grade::Critical);
        assert_eq!(evaluation.comments.len(), 1);
        assert_eq!(
            evaluation.comments[0].summary,
            "Container has no configured security context"
        );
        assert_eq!(
            evaluation.comments[0].description,
            "Set securityContext to run the container in a more secure context."
        );
    }

    #[test]
    fn test_all_required_values_set() {
        let evaluation = evaluate(
            Some(SecurityContext {
                read_only_root_filesystem: Some(true),
                run_as_group: Some(23000),
                run_as_user: Some(33000),
                run_as_non_root: Some(true),
                privileged: Some(false),
                ..Default::default()
            }),
            None,
        );
        assert_eq!(evaluation.grade, Grade::AllOK);
        assert!(evaluation.comments.is_empty());
    }

    #[test]
    fn test_writable_root_filesystem() {
        let evaluation = evaluate(
            Some(SecurityContext {
                read_only_root_filesystem: Some(false),
                ..Default::default()
            }),
            None,
        );
        assert_eq!(evaluation.grade, Grade::Critical);
        assert!(has_summary(
            &evaluation,
            "The pod has a container with a writable root filesystem"
        ));
    }

    #[test]
    fn test_empty_context_reports_every_field() {
        let evaluation = evaluate(Some(SecurityContext::default()), None);
        assert_eq!(evaluation.grade, Grade::Critical);
        assert!(has_summary(
            &evaluation,
            "The pod has a container with a writable root filesystem"
        ));
        assert!(has_summary(&evaluation, "The container is running with a low user ID"));
        assert!(has_summary(&evaluation, "The container running with a low group ID"));
        assert!(!has_summary(&evaluation, "The container is privileged"));
    }

    #[test]
    fn test_id_threshold_is_inclusive() {
        let with_ids = |id: i64| {
            evaluate(
                Some(SecurityContext {
                    read_only_root_filesystem: Some(true),
                    run_as_user: Some(id),
                    run_as_group: Some(id),
                    privileged: Some(false),
                    ..Default::default()
                }),
                None,
            )
        };

        let evaluation = with_ids(MIN_ID);
        assert_eq!(evaluation.grade, Grade::AllOK);
        assert!(evaluation.comments.is_empty());

        let evaluation = with_ids(MIN_ID - 1);
        assert_eq!(evaluation.grade, Grade::Critical);
        assert!(has_summary(&evaluation, "The container is running with a low user ID"));
        assert!(has_summary(&evaluation, "The container running with a low group ID"));
    }

    #[test]
    fn test_pod_context_is_inherited() {
        let evaluation = evaluate(
            Some(SecurityContext {
                read_only_root_filesystem: Some(true),
                run_as_non_root: Some(true),
                privileged: Some(false),
                ..Default::default()
            }),
            Some(PodSecurityContext {
                run_as_user: Some(20000),
                run_as_group: Some(20000),
                ..Default::default()
            }),
        );
        assert_eq!(evaluation.grade, Grade::AllOK);
    }

    #[test]
    fn test_container_values_override_pod_context() {
        let evaluation = evaluate(
            Some(SecurityContext {
                read_only_root_filesystem: Some(true),
                run_as_non_root: Some(true),
                privileged: Some(false),
                run_as_user: Some(4),
                run_as_group: Some(5),
                ..Default::default()
            }),
            Some(PodSecurityContext {
                run_as_user: Some(20000),
                run_as_group: Some(20000),
                ..Default::default()
            }),
        );
        assert_eq!(evaluation.grade, Grade::Critical);
        assert!(has_summary(&evaluation, "The container running with a low group ID"));
        assert!(has_summary(&evaluation, "The container is running with a low user ID"));
    }

    #[test]
    fn test_low_user_id_without_pod_override() {
        let evaluation = evaluate(
            Some(SecurityContext {
                read_only_root_filesystem: Some(true),
                run_as_user: Some(1000),
                run_as_group: Some(20000),
                ..Default::default()
            }),
            None,
        );
        assert_eq!(evaluation.grade, Grade::Critical);
        assert_eq!(evaluation.comments.len(), 1);
        assert_eq!(
            evaluation.comments[0].summary,
            "The container is running with a low user ID"
        );
    }

    #[test]
    fn test_privileged() {
        let evaluation = evaluate(
            Some(SecurityContext {
                read_only_root_filesystem: Some(true),
                run_as_user: Some(20000),
                run_as_group: Some(20000),
                privileged: Some(true),
                ..Default::default()
            }),
            None,
        );
        assert_eq!(evaluation.grade, Grade::Critical);
        assert!(has_summary(&evaluation, "The container is privileged"));
    }

    #[test]
    fn test_seccomp() {
        let index = ResourceIndex::default();
        let mut t = template(None, None);
        let evaluation = SeccompProfileCheck.evaluate(&t, &index);
        assert_eq!(evaluation.grade, Grade::Warning);
        assert_eq!(
            evaluation.comments[0].summary,
            "The pod has not configured Seccomp for its containers"
        );

        t.annotations
            .insert(SECCOMP_ANNOTATION.to_string(), "runtime/default".to_string());
        assert_eq!(SeccompProfileCheck.evaluate(&t, &index).grade, Grade::AllOK);

        let t = template(
            None,
            Some(PodSecurityContext {
                seccomp_profile: Some(SeccompProfile {
                    type_: "RuntimeDefault".to_string(),
                    localhost_profile: None,
                }),
                ..Default::default()
            }),
        );
        assert_eq!(SeccompProfileCheck.evaluate(&t, &index).grade, Grade::AllOK);
    }
}
