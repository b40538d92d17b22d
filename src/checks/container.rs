//! Container resource and image checks.

use crate::checks::{Evaluation, PodTemplateCheck};
use crate::context::{PodTemplate, ResourceIndex};
use crate::extract::container::{all_containers, has_digest, image_tag};
use crate::types::Grade;

/// Every container must declare CPU and memory requests and limits.
pub struct ResourcesCheck {
    pub require_cpu_limit: bool,
    pub require_memory_limit: bool,
}

impl PodTemplateCheck for ResourcesCheck {
    fn evaluate(&self, template: &PodTemplate, _index: &ResourceIndex) -> Evaluation {
        let mut evaluation = Evaluation::ok();

        for container in all_containers(&template.spec) {
            let limits = &container.resources.limits;
            let requests = &container.resources.requests;

            if self.require_cpu_limit && !limits.contains_key("cpu") {
                evaluation.add_comment(
                    &container.name,
                    "CPU limit is not set",
                    "Resource limits are recommended to avoid resource DDOS. Set resources.limits.cpu",
                );
            }
            if self.require_memory_limit && !limits.contains_key("memory") {
                evaluation.add_comment(
                    &container.name,
                    "Memory limit is not set",
                    "Resource limits are recommended to avoid resource DDOS. Set resources.limits.memory",
                );
            }
            if !requests.contains_key("cpu") {
                evaluation.add_comment(
                    &container.name,
                    "CPU request is not set",
                    "Resource requests are recommended to make sure that the application can start and run without crashing. Set resources.requests.cpu",
                );
            }
            if !requests.contains_key("memory") {
                evaluation.add_comment(
                    &container.name,
                    "Memory request is not set",
                    "Resource requests are recommended to make sure that the application can start and run without crashing. Set resources.requests.memory",
                );
            }
        }

        if !evaluation.comments.is_empty() {
            evaluation.grade = Grade::Critical;
        }
        evaluation
    }
}

/// Requests must equal limits, compared as quantities.
pub struct RequestsEqualLimitsCheck {
    pub require_cpu: bool,
}

impl PodTemplateCheck for RequestsEqualLimitsCheck {
    fn evaluate(&self, template: &PodTemplate, _index: &ResourceIndex) -> Evaluation {
        let mut evaluation = Evaluation::ok();

        for container in all_containers(&template.spec) {
            let resources = &container.resources;
            let matches = |name: &str| match (resources.requests.get(name), resources.limits.get(name)) {
                (Some(request), Some(limit)) => request.same_value(limit),
                _ => false,
            };

            if self.require_cpu && !matches("cpu") {
                evaluation.add_comment(
                    &container.name,
                    "CPU requests does not match limits",
                    "Having equal requests and limits is recommended to avoid resource DDOS of the node during spikes. Set resources.requests.cpu == resources.limits.cpu",
                );
            }
            if !matches("memory") {
                evaluation.add_comment(
                    &container.name,
                    "Memory requests does not match limits",
                    "Having equal requests and limits is recommended to avoid resource DDOS of the node during spikes. Set resources.requests.memory == resources.limits.memory",
                );
            }
        }

        if !evaluation.comments.is_empty() {
            evaluation.grade = Grade::Critical;
        }
        evaluation
    }
}

/// Images must be pinned to a tag other than `latest`, or to a digest.
pub struct ImageTagCheck;

impl PodTemplateCheck for ImageTagCheck {
    fn evaluate(&self, template: &PodTemplate, _index: &ResourceIndex) -> Evaluation {
        let mut evaluation = Evaluation::ok();

        for container in all_containers(&template.spec) {
            let image = container.image.as_deref().unwrap_or_default();
            if has_digest(image) {
                continue;
            }
            if matches!(image_tag(image), None | Some("latest")) {
                evaluation.add_comment(
                    &container.name,
                    "Image with latest tag",
                    "Using a fixed tag is recommended to avoid accidental upgrades",
                );
            }
        }

        if !evaluation.comments.is_empty() {
            evaluation.grade = Grade::Critical;
        }
        evaluation
    }
}

/// Every container must pull its image with policy `Always`.
pub struct ImagePullPolicyCheck;

impl PodTemplateCheck for ImagePullPolicyCheck {
    fn evaluate(&self, template: &PodTemplate, _index: &ResourceIndex) -> Evaluation {
        let mut evaluation = Evaluation::ok();

        for container in all_containers(&template.spec) {
            if container.image_pull_policy.as_deref() != Some("Always") {
                evaluation.add_comment(
                    &container.name,
                    "ImagePullPolicy is not set to Always",
                    "It's recommended to always set the ImagePullPolicy to Always, to make sure that the imagePullSecrets are always correct, and to always get the image you want.",
                );
            }
        }

        if !evaluation.comments.is_empty() {
            evaluation.grade = Grade::Critical;
        }
        evaluation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Quantity;
    use crate::schema::core_v1::{Container, PodSpec, ResourceRequirements};
    use std::collections::BTreeMap;

    fn resources(pairs: &[(&str, &str)]) -> BTreeMap<String, Quantity> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Quantity::new(*v)))
            .collect()
    }

    fn container(
        name: &str,
        requests: &[(&str, &str)],
        limits: &[(&str, &str)],
    ) -> Container {
        Container {
            name: name.to_string(),
            resources: ResourceRequirements {
                requests: resources(requests),
                limits: resources(limits),
            },
            ..Default::default()
        }
    }

    fn template(containers: Vec<Container>, init_containers: Vec<Container>) -> PodTemplate {
        PodTemplate {
            namespace: "default".to_string(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            spec: PodSpec {
                containers,
                init_containers,
                ..Default::default()
            },
        }
    }

    fn requests_equal_limits(require_cpu: bool, t: &PodTemplate) -> Evaluation {
        RequestsEqualLimitsCheck { require_cpu }.evaluate(t, &ResourceIndex::default())
    }

    #[test]
    fn test_requests_equal_limits_all_the_same() {
        let same = &[("cpu", "1"), ("memory", "1Gi")];
        let t = template(vec![container("foo", same, same)], vec![]);
        assert_eq!(requests_equal_limits(true, &t).grade, Grade::AllOK);
    }

    #[test]
    fn test_requests_equal_limits_same_quantity_different_spelling() {
        let t = template(
            vec![container(
                "foo",
                &[("cpu", "1"), ("memory", "1Gi")],
                &[("cpu", "1000m"), ("memory", "1024Mi")],
            )],
            vec![],
        );
        assert_eq!(requests_equal_limits(true, &t).grade, Grade::AllOK);
    }

    #[test]
    fn test_requests_equal_limits_both_differ() {
        let t = template(
            vec![container(
                "foo",
                &[("cpu", "1"), ("memory", "1Gi")],
                &[("cpu", "2"), ("memory", "2Gi")],
            )],
            vec![],
        );
        let evaluation = requests_equal_limits(true, &t);
        assert_eq!(evaluation.grade, Grade::Critical);
        assert_eq!(evaluation.comments.len(), 2);
        assert_eq!(evaluation.comments[0].path, "foo");
        assert_eq!(evaluation.comments[0].summary, "CPU requests does not match limits");
        assert_eq!(evaluation.comments[1].summary, "Memory requests does not match limits");
    }

    #[test]
    fn test_requests_equal_limits_checks_init_containers() {
        let same = &[("cpu", "1"), ("memory", "1Gi")];
        let t = template(
            vec![container("foo", same, same)],
            vec![container(
                "init",
                &[("cpu", "1"), ("memory", "1Gi")],
                &[("cpu", "2"), ("memory", "1Gi")],
            )],
        );
        let evaluation = requests_equal_limits(true, &t);
        assert_eq!(evaluation.grade, Grade::Critical);
        assert_eq!(evaluation.comments.len(), 1);
        assert_eq!(evaluation.comments[0].path, "init");
        assert_eq!(evaluation.comments[0].summary, "CPU requests does not match limits");
    }

    #[test]
    fn test_requests_equal_limits_ignore_cpu() {
        let t = template(
            vec![container(
                "foo",
                &[("cpu", "1"), ("memory", "1Gi")],
                &[("memory", "1Gi")],
            )],
            vec![],
        );
        assert_eq!(requests_equal_limits(false, &t).grade, Grade::AllOK);

        let t = template(
            vec![container("foo", &[("memory", "1Gi")], &[("memory", "2Gi")])],
            vec![],
        );
        let evaluation = requests_equal_limits(false, &t);
        assert_eq!(evaluation.grade, Grade::Critical);
        assert_eq!(evaluation.comments.len(), 1);
        assert_eq!(evaluation.comments[0].summary, "Memory requests does not match limits");
    }

    #[test]
    fn test_resources_missing() {
        let t = template(vec![container("foo", &[("cpu", "1")], &[])], vec![]);
        let check = ResourcesCheck {
            require_cpu_limit: true,
            require_memory_limit: true,
        };
        let evaluation = check.evaluate(&t, &ResourceIndex::default());
        assert_eq!(evaluation.grade, Grade::Critical);
        let summaries: Vec<&str> = evaluation.comments.iter().map(|c| c.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec!["CPU limit is not set", "Memory limit is not set", "Memory request is not set"]
        );
    }

    #[test]
    fn test_resources_limit_requirements_can_be_ignored() {
        let requests = &[("cpu", "1"), ("memory", "1Gi")];
        let t = template(vec![container("foo", requests, &[])], vec![]);
        let check = ResourcesCheck {
            require_cpu_limit: false,
            require_memory_limit: false,
        };
        assert_eq!(check.evaluate(&t, &ResourceIndex::default()).grade, Grade::AllOK);
    }

    #[test]
    fn test_image_tag() {
        let index = ResourceIndex::default();
        let with_image = |image: Option<&str>| {
            template(
                vec![Container {
                    name: "app".to_string(),
                    image: image.map(str::to_string),
                    ..Default::default()
                }],
                vec![],
            )
        };

        assert_eq!(ImageTagCheck.evaluate(&with_image(Some("nginx:1.25")), &index).grade, Grade::AllOK);
        assert_eq!(
            ImageTagCheck.evaluate(&with_image(Some("nginx@sha256:0123")), &index).grade,
            Grade::AllOK
        );
        let latest = ImageTagCheck.evaluate(&with_image(Some("nginx:latest")), &index);
        assert_eq!(latest.grade, Grade::Critical);
        assert_eq!(latest.comments[0].summary, "Image with latest tag");
        assert_eq!(ImageTagCheck.evaluate(&with_image(Some("nginx")), &index).grade, Grade::Critical);
        assert_eq!(ImageTagCheck.evaluate(&with_image(None), &index).grade, Grade::Critical);
    }

    #[test]
    fn test_image_pull_policy() {
        let index = ResourceIndex::default();
        let with_policy = |policy: Option<&str>| {
            template(
                vec![Container {
                    name: "app".to_string(),
                    image_pull_policy: policy.map(str::to_string),
                    ..Default::default()
                }],
                vec![],
            )
        };

        assert_eq!(
            ImagePullPolicyCheck.evaluate(&with_policy(Some("Always")), &index).grade,
            Grade::AllOK
        );
        let never = ImagePullPolicyCheck.evaluate(&with_policy(Some("IfNotPresent")), &index);
        assert_eq!(never.grade, Grade::Critical);
        assert_eq!(never.comments[0].summary, "ImagePullPolicy is not set to Always");
        assert_eq!(ImagePullPolicyCheck.evaluate(&with_policy(None), &index).grade, Grade::Critical);
    }
}
