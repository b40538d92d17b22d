//! Deprecated apiVersion detection.

use crate::checks::{Evaluation, MetadataCheck};
use crate::objectkinds::stable_replacement;
use crate::types::{Grade, ObjectMeta, TypeMeta};

/// Warns when a newer stable apiVersion exists for the resource's kind.
pub struct StableVersionCheck;

impl MetadataCheck for StableVersionCheck {
    fn evaluate(&self, type_meta: &TypeMeta, _meta: &ObjectMeta) -> Evaluation {
        match stable_replacement(type_meta) {
            Some(replacement) => Evaluation::new(Grade::Warning).with_comment(
                "",
                format!(
                    "The apiVersion and kind {}/{} is deprecated",
                    type_meta.api_version, type_meta.kind
                ),
                format!(
                    "It's recommended to use {} instead which has been available since Kubernetes v{}",
                    replacement.api_version, replacement.since
                ),
            ),
            None => Evaluation::ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deprecated_deployment_warns() {
        let evaluation = StableVersionCheck.evaluate(
            &TypeMeta::new("extensions/v1beta1", "Deployment"),
            &ObjectMeta::new("web"),
        );
        assert_eq!(evaluation.grade, Grade::Warning);
        assert_eq!(
            evaluation.comments[0].summary,
            "The apiVersion and kind extensions/v1beta1/Deployment is deprecated"
        );
        assert_eq!(
            evaluation.comments[0].description,
            "It's recommended to use apps/v1 instead which has been available since Kubernetes v1.9"
        );
    }

    #[test]
    fn test_stable_versions_pass() {
        for (api_version, kind) in [("apps/v1", "Deployment"), ("v1", "Pod"), ("batch/v1", "CronJob")] {
            let evaluation =
                StableVersionCheck.evaluate(&TypeMeta::new(api_version, kind), &ObjectMeta::new("x"));
            assert_eq!(evaluation, Evaluation::ok());
        }
    }
}
