//! Supported (apiVersion, kind) pairs.
//!
//! Every document is looked up here before decoding. A pair that is not in
//! [`SUPPORTED`] is an unrecognized kind and never reaches the index.

use crate::types::TypeMeta;

/// The adapter a supported (apiVersion, kind) pair decodes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownKind {
    Pod,
    AppsV1Deployment,
    AppsV1beta1Deployment,
    AppsV1beta2Deployment,
    ExtensionsV1beta1Deployment,
    AppsV1StatefulSet,
    AppsV1beta1StatefulSet,
    AppsV1beta2StatefulSet,
    AppsV1DaemonSet,
    AppsV1beta2DaemonSet,
    ExtensionsV1beta1DaemonSet,
    BatchV1Job,
    BatchV1beta1CronJob,
    BatchV1CronJob,
    Service,
    NetworkingV1NetworkPolicy,
    ExtensionsV1beta1NetworkPolicy,
    PolicyV1beta1PodDisruptionBudget,
    PolicyV1PodDisruptionBudget,
    /// Scored on identity alone (Ingress, ConfigMap, Secret, ServiceAccount).
    MetadataOnly,
}

/// `(apiVersion, kind, adapter)` for every decodable document.
pub const SUPPORTED: &[(&str, &str, KnownKind)] = &[
    ("v1", "Pod", KnownKind::Pod),
    ("apps/v1", "Deployment", KnownKind::AppsV1Deployment),
    ("apps/v1beta1", "Deployment", KnownKind::AppsV1beta1Deployment),
    ("apps/v1beta2", "Deployment", KnownKind::AppsV1beta2Deployment),
    ("extensions/v1beta1", "Deployment", KnownKind::ExtensionsV1beta1Deployment),
    ("apps/v1", "StatefulSet", KnownKind::AppsV1StatefulSet),
    ("apps/v1beta1", "StatefulSet", KnownKind::AppsV1beta1StatefulSet),
    ("apps/v1beta2", "StatefulSet", KnownKind::AppsV1beta2StatefulSet),
    ("apps/v1", "DaemonSet", KnownKind::AppsV1DaemonSet),
    ("apps/v1beta2", "DaemonSet", KnownKind::AppsV1beta2DaemonSet),
    ("extensions/v1beta1", "DaemonSet", KnownKind::ExtensionsV1beta1DaemonSet),
    ("batch/v1", "Job", KnownKind::BatchV1Job),
    ("batch/v1beta1", "CronJob", KnownKind::BatchV1beta1CronJob),
    ("batch/v1", "CronJob", KnownKind::BatchV1CronJob),
    ("v1", "Service", KnownKind::Service),
    ("networking.k8s.io/v1", "NetworkPolicy", KnownKind::NetworkingV1NetworkPolicy),
    ("extensions/v1beta1", "NetworkPolicy", KnownKind::ExtensionsV1beta1NetworkPolicy),
    ("policy/v1beta1", "PodDisruptionBudget", KnownKind::PolicyV1beta1PodDisruptionBudget),
    ("policy/v1", "PodDisruptionBudget", KnownKind::PolicyV1PodDisruptionBudget),
    ("extensions/v1beta1", "Ingress", KnownKind::MetadataOnly),
    ("networking.k8s.io/v1beta1", "Ingress", KnownKind::MetadataOnly),
    ("networking.k8s.io/v1", "Ingress", KnownKind::MetadataOnly),
    ("v1", "ConfigMap", KnownKind::MetadataOnly),
    ("v1", "Secret", KnownKind::MetadataOnly),
    ("v1", "ServiceAccount", KnownKind::MetadataOnly),
];

/// Look up the adapter for a document header.
pub fn lookup(api_version: &str, kind: &str) -> Option<KnownKind> {
    SUPPORTED
        .iter()
        .find(|(v, k, _)| *v == api_version && *k == kind)
        .map(|(_, _, known)| *known)
}

/// A newer stable home for a deprecated (apiVersion, kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StableReplacement {
    pub api_version: &'static str,
    /// Kubernetes minor release where the replacement became available.
    pub since: &'static str,
}

const DEPRECATIONS: &[(&str, &str, StableReplacement)] = &[
    ("extensions/v1beta1", "Deployment", APPS_V1),
    ("apps/v1beta1", "Deployment", APPS_V1),
    ("apps/v1beta2", "Deployment", APPS_V1),
    ("apps/v1beta1", "StatefulSet", APPS_V1),
    ("apps/v1beta2", "StatefulSet", APPS_V1),
    ("extensions/v1beta1", "DaemonSet", APPS_V1),
    ("apps/v1beta2", "DaemonSet", APPS_V1),
    (
        "extensions/v1beta1",
        "NetworkPolicy",
        StableReplacement {
            api_version: "networking.k8s.io/v1",
            since: "1.8",
        },
    ),
    (
        "batch/v1beta1",
        "CronJob",
        StableReplacement {
            api_version: "batch/v1",
            since: "1.21",
        },
    ),
    (
        "policy/v1beta1",
        "PodDisruptionBudget",
        StableReplacement {
            api_version: "policy/v1",
            since: "1.21",
        },
    ),
    ("extensions/v1beta1", "Ingress", NETWORKING_V1_INGRESS),
    ("networking.k8s.io/v1beta1", "Ingress", NETWORKING_V1_INGRESS),
];

const APPS_V1: StableReplacement = StableReplacement {
    api_version: "apps/v1",
    since: "1.9",
};

const NETWORKING_V1_INGRESS: StableReplacement = StableReplacement {
    api_version: "networking.k8s.io/v1",
    since: "1.19",
};

/// The stable replacement for a deprecated type, or `None` if it is current.
pub fn stable_replacement(type_meta: &TypeMeta) -> Option<StableReplacement> {
    DEPRECATIONS
        .iter()
        .find(|(v, k, _)| *v == type_meta.api_version && *k == type_meta.kind)
        .map(|(_, _, replacement)| *replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("apps/v1", "Deployment"), Some(KnownKind::AppsV1Deployment));
        assert_eq!(lookup("batch/v1", "CronJob"), Some(KnownKind::BatchV1CronJob));
        assert_eq!(lookup("v1", "Secret"), Some(KnownKind::MetadataOnly));
        assert_eq!(lookup("apps/v1", "Pod"), None);
        assert_eq!(lookup("example.com/v1", "Widget"), None);
    }

    #[test]
    fn test_every_deprecated_type_is_supported() {
        for (api_version, kind, replacement) in DEPRECATIONS {
            assert!(lookup(api_version, kind).is_some(), "{api_version}/{kind}");
            assert!(lookup(replacement.api_version, kind).is_some());
        }
    }

    #[test]
    fn test_stable_replacement() {
        let old = TypeMeta::new("extensions/v1beta1", "Deployment");
        let replacement = stable_replacement(&old).unwrap();
        assert_eq!(replacement.api_version, "apps/v1");
        assert_eq!(replacement.since, "1.9");
        assert!(stable_replacement(&TypeMeta::new("apps/v1", "Deployment")).is_none());
        assert!(stable_replacement(&TypeMeta::new("v1", "Pod")).is_none());
    }
}
