//! Service targeting.

use crate::checks::{Evaluation, ServiceCheck};
use crate::context::{PodTemplate, ResourceIndex, Service};
use crate::extract::selector_matches;
use crate::types::Grade;

/// Whether a service routes traffic to pods from this template.
///
/// Alias-only (ExternalName) services never target pods.
pub fn service_targets(service: &Service, template: &PodTemplate) -> bool {
    !service.is_external_name()
        && service.meta.namespace == template.namespace
        && selector_matches(&service.label_selector(), &template.labels)
}

/// A service should select at least one pod in its namespace.
pub struct ServiceTargetsPodCheck;

impl ServiceCheck for ServiceTargetsPodCheck {
    fn evaluate(&self, service: &Service, index: &ResourceIndex) -> Evaluation {
        if service.is_external_name() {
            return Evaluation::ok();
        }

        let has_match = index
            .pod_templates_in(&service.meta.namespace)
            .any(|t| service_targets(service, t));

        if has_match {
            Evaluation::ok()
        } else {
            Evaluation::new(Grade::Critical).with_comment(
                "",
                "The services selector does not match any pods",
                "",
            )
        }
    }
}
