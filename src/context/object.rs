//! Canonical resource records.
//!
//! Every supported schema version decodes into one of the records here.
//! Workloads go through [`PodSpecer`], the one capability surface shared by
//! all deployment-, stateful-set-, daemon-set-, job- and cron-job-like
//! versions.

use crate::schema::meta_v1::{self, LabelSelector};
use crate::schema::{
    apps_v1, apps_v1beta1, batch_v1, core_v1, extensions_v1beta1, networking_v1, policy_v1,
};
use crate::types::{DEFAULT_NAMESPACE, ObjectMeta, TypeMeta, WorkloadKind};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A pod specification together with the labels and annotations of the
/// template that carries it.
///
/// Bare pods and workload templates are both represented this way, so every
/// pod-template check scores them identically.
#[derive(Debug, Clone, PartialEq)]
pub struct PodTemplate {
    /// Namespace of the owning resource. A template's own namespace is ignored.
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub spec: core_v1::PodSpec,
}

impl PodTemplate {
    fn from_spec(
        template_meta: &meta_v1::ObjectMeta,
        owner_namespace: &str,
        spec: &core_v1::PodSpec,
    ) -> Self {
        Self {
            namespace: owner_namespace.to_string(),
            labels: template_meta.labels.clone().unwrap_or_default(),
            annotations: template_meta.annotations.clone().unwrap_or_default(),
            spec: spec.clone(),
        }
    }
}

/// Capability surface shared by every workload schema version.
pub trait PodSpecer {
    fn type_meta(&self) -> TypeMeta;
    fn object_meta(&self) -> ObjectMeta;
    fn pod_template(&self) -> PodTemplate;
}

/// The closed set of workload schema versions that own a pod template.
#[derive(Debug, Clone)]
pub enum WorkloadSource {
    AppsV1Deployment(apps_v1::Deployment),
    AppsV1beta1Deployment(apps_v1beta1::Deployment),
    AppsV1beta2Deployment(apps_v1::Deployment),
    ExtensionsV1beta1Deployment(extensions_v1beta1::Deployment),
    AppsV1StatefulSet(apps_v1::StatefulSet),
    AppsV1beta1StatefulSet(apps_v1::StatefulSet),
    AppsV1beta2StatefulSet(apps_v1::StatefulSet),
    AppsV1DaemonSet(apps_v1::DaemonSet),
    AppsV1beta2DaemonSet(apps_v1::DaemonSet),
    ExtensionsV1beta1DaemonSet(extensions_v1beta1::DaemonSet),
    BatchV1Job(batch_v1::Job),
    BatchV1beta1CronJob(batch_v1::CronJob),
    BatchV1CronJob(batch_v1::CronJob),
}

impl WorkloadSource {
    pub fn kind(&self) -> WorkloadKind {
        match self {
            Self::AppsV1Deployment(_)
            | Self::AppsV1beta1Deployment(_)
            | Self::AppsV1beta2Deployment(_)
            | Self::ExtensionsV1beta1Deployment(_) => WorkloadKind::Deployment,
            Self::AppsV1StatefulSet(_)
            | Self::AppsV1beta1StatefulSet(_)
            | Self::AppsV1beta2StatefulSet(_) => WorkloadKind::StatefulSet,
            Self::AppsV1DaemonSet(_)
            | Self::AppsV1beta2DaemonSet(_)
            | Self::ExtensionsV1beta1DaemonSet(_) => WorkloadKind::DaemonSet,
            Self::BatchV1Job(_) => WorkloadKind::Job,
            Self::BatchV1beta1CronJob(_) | Self::BatchV1CronJob(_) => WorkloadKind::CronJob,
        }
    }

    fn api_version(&self) -> &'static str {
        match self {
            Self::AppsV1Deployment(_) | Self::AppsV1StatefulSet(_) | Self::AppsV1DaemonSet(_) => {
                "apps/v1"
            }
            Self::AppsV1beta1Deployment(_) | Self::AppsV1beta1StatefulSet(_) => "apps/v1beta1",
            Self::AppsV1beta2Deployment(_)
            | Self::AppsV1beta2StatefulSet(_)
            | Self::AppsV1beta2DaemonSet(_) => "apps/v1beta2",
            Self::ExtensionsV1beta1Deployment(_) | Self::ExtensionsV1beta1DaemonSet(_) => {
                "extensions/v1beta1"
            }
            Self::BatchV1Job(_) | Self::BatchV1CronJob(_) => "batch/v1",
            Self::BatchV1beta1CronJob(_) => "batch/v1beta1",
        }
    }

    fn metadata(&self) -> &meta_v1::ObjectMeta {
        match self {
            Self::AppsV1Deployment(d) | Self::AppsV1beta2Deployment(d) => &d.metadata,
            Self::AppsV1beta1Deployment(d) | Self::ExtensionsV1beta1Deployment(d) => &d.metadata,
            Self::AppsV1StatefulSet(s)
            | Self::AppsV1beta1StatefulSet(s)
            | Self::AppsV1beta2StatefulSet(s) => &s.metadata,
            Self::AppsV1DaemonSet(d) | Self::AppsV1beta2DaemonSet(d) => &d.metadata,
            Self::ExtensionsV1beta1DaemonSet(d) => &d.metadata,
            Self::BatchV1Job(j) => &j.metadata,
            Self::BatchV1beta1CronJob(c) | Self::BatchV1CronJob(c) => &c.metadata,
        }
    }

    fn template(&self) -> &core_v1::PodTemplateSpec {
        match self {
            Self::AppsV1Deployment(d) | Self::AppsV1beta2Deployment(d) => &d.spec.template,
            Self::AppsV1beta1Deployment(d) | Self::ExtensionsV1beta1Deployment(d) => {
                &d.spec.template
            }
            Self::AppsV1StatefulSet(s)
            | Self::AppsV1beta1StatefulSet(s)
            | Self::AppsV1beta2StatefulSet(s) => &s.spec.template,
            Self::AppsV1DaemonSet(d) | Self::AppsV1beta2DaemonSet(d) => &d.spec.template,
            Self::ExtensionsV1beta1DaemonSet(d) => &d.spec.template,
            Self::BatchV1Job(j) => &j.spec.template,
            Self::BatchV1beta1CronJob(c) | Self::BatchV1CronJob(c) => {
                &c.spec.job_template.spec.template
            }
        }
    }
}

impl PodSpecer for WorkloadSource {
    fn type_meta(&self) -> TypeMeta {
        TypeMeta::new(self.api_version(), self.kind().as_str())
    }

    fn object_meta(&self) -> ObjectMeta {
        canonical_meta(self.metadata())
    }

    fn pod_template(&self) -> PodTemplate {
        let owner = self.object_meta();
        let template = self.template();
        PodTemplate::from_spec(&template.metadata, &owner.namespace, &template.spec)
    }
}

/// Convert wire metadata into canonical identity, defaulting the namespace.
pub fn canonical_meta(meta: &meta_v1::ObjectMeta) -> ObjectMeta {
    ObjectMeta {
        name: meta.name.clone().unwrap_or_default(),
        namespace: meta
            .namespace
            .clone()
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
        labels: meta.labels.clone().unwrap_or_default(),
        annotations: meta.annotations.clone().unwrap_or_default(),
    }
}

/// A bare pod.
#[derive(Debug, Clone, PartialEq)]
pub struct Pod {
    pub type_meta: TypeMeta,
    pub meta: ObjectMeta,
    pub template: PodTemplate,
}

impl Pod {
    pub fn from_v1(pod: &core_v1::Pod) -> Self {
        let meta = canonical_meta(&pod.metadata);
        let template = PodTemplate {
            namespace: meta.namespace.clone(),
            labels: meta.labels.clone(),
            annotations: meta.annotations.clone(),
            spec: pod.spec.clone(),
        };
        Self {
            type_meta: TypeMeta::new("v1", "Pod"),
            meta,
            template,
        }
    }
}

/// Any resource that owns a pod template, adapted from its schema version.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    pub type_meta: TypeMeta,
    pub meta: ObjectMeta,
    pub kind: WorkloadKind,
    pub template: PodTemplate,
}

impl Workload {
    pub fn adapt(source: &WorkloadSource) -> Self {
        Self {
            type_meta: source.type_meta(),
            meta: source.object_meta(),
            kind: source.kind(),
            template: source.pod_template(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub type_meta: TypeMeta,
    pub meta: ObjectMeta,
    /// `None` when the service declares no selector.
    pub selector: Option<BTreeMap<String, String>>,
    pub service_type: String,
}

impl Service {
    pub fn from_v1(service: &core_v1::Service) -> Self {
        Self {
            type_meta: TypeMeta::new("v1", "Service"),
            meta: canonical_meta(&service.metadata),
            selector: service.spec.selector.clone(),
            service_type: service
                .spec
                .type_
                .clone()
                .unwrap_or_else(|| "ClusterIP".to_string()),
        }
    }

    /// Alias-only services route by DNS name and select no pods.
    pub fn is_external_name(&self) -> bool {
        self.service_type == "ExternalName"
    }

    /// The selector as a label selector. A missing selector selects everything.
    pub fn label_selector(&self) -> LabelSelector {
        LabelSelector::from_match_labels(self.selector.clone().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PolicyType {
    Ingress,
    Egress,
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingress => write!(f, "Ingress"),
            Self::Egress => write!(f, "Egress"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPolicy {
    pub type_meta: TypeMeta,
    pub meta: ObjectMeta,
    pub pod_selector: LabelSelector,
    pub policy_types: BTreeSet<PolicyType>,
}

impl NetworkPolicy {
    /// Adapt a policy from either of its group versions.
    ///
    /// Without explicit `policyTypes` the policy covers Ingress, plus Egress
    /// when it declares egress rules.
    pub fn adapt(api_version: &str, policy: &networking_v1::NetworkPolicy) -> Self {
        let policy_types = match &policy.spec.policy_types {
            Some(types) => types
                .iter()
                .filter_map(|t| match t.as_str() {
                    "Ingress" => Some(PolicyType::Ingress),
                    "Egress" => Some(PolicyType::Egress),
                    other => {
                        log::debug!("ignoring unknown policy type '{}'", other);
                        None
                    }
                })
                .collect(),
            None => {
                let mut types = BTreeSet::from([PolicyType::Ingress]);
                if policy.spec.egress.as_ref().is_some_and(|e| !e.is_empty()) {
                    types.insert(PolicyType::Egress);
                }
                types
            }
        };

        Self {
            type_meta: TypeMeta::new(api_version, "NetworkPolicy"),
            meta: canonical_meta(&policy.metadata),
            pod_selector: policy.spec.pod_selector.clone(),
            policy_types,
        }
    }

    pub fn covers(&self, policy_type: PolicyType) -> bool {
        self.policy_types.contains(&policy_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisruptionBudget {
    pub type_meta: TypeMeta,
    pub meta: ObjectMeta,
    /// A budget without a selector protects no pods.
    pub selector: Option<LabelSelector>,
}

impl DisruptionBudget {
    pub fn adapt(api_version: &str, pdb: &policy_v1::PodDisruptionBudget) -> Self {
        Self {
            type_meta: TypeMeta::new(api_version, "PodDisruptionBudget"),
            meta: canonical_meta(&pdb.metadata),
            selector: pdb.spec.selector.clone(),
        }
    }
}

/// A resource scored on its identity alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataOnly {
    pub type_meta: TypeMeta,
    pub meta: ObjectMeta,
}

/// A decoded, normalized resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Pod(Pod),
    Workload(Workload),
    Service(Service),
    NetworkPolicy(NetworkPolicy),
    DisruptionBudget(DisruptionBudget),
    MetadataOnly(MetadataOnly),
}

impl Resource {
    pub fn type_meta(&self) -> &TypeMeta {
        match self {
            Self::Pod(r) => &r.type_meta,
            Self::Workload(r) => &r.type_meta,
            Self::Service(r) => &r.type_meta,
            Self::NetworkPolicy(r) => &r.type_meta,
            Self::DisruptionBudget(r) => &r.type_meta,
            Self::MetadataOnly(r) => &r.type_meta,
        }
    }

    pub fn object_meta(&self) -> &ObjectMeta {
        match self {
            Self::Pod(r) => &r.meta,
            Self::Workload(r) => &r.meta,
            Self::Service(r) => &r.meta,
            Self::NetworkPolicy(r) => &r.meta,
            Self::DisruptionBudget(r) => &r.meta,
            Self::MetadataOnly(r) => &r.meta,
        }
    }

    /// The pod template of bare pods and workloads.
    pub fn pod_template(&self) -> Option<&PodTemplate> {
        match self {
            Self::Pod(p) => Some(&p.template),
            Self::Workload(w) => Some(&w.template),
            _ => None,
        }
    }
}
