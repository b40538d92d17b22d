//! `networking.k8s.io/v1` NetworkPolicy.

use crate::schema::meta_v1::{LabelSelector, ObjectMeta};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkPolicy {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: NetworkPolicySpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicySpec {
    /// An empty selector selects every pod in the namespace.
    #[serde(default)]
    pub pod_selector: LabelSelector,
    #[serde(default)]
    pub policy_types: Option<Vec<String>>,
    #[serde(default)]
    pub ingress: Option<Vec<serde_yaml::Value>>,
    #[serde(default)]
    pub egress: Option<Vec<serde_yaml::Value>>,
}
