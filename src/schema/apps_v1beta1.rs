//! `apps/v1beta1` workloads.

use crate::schema::core_v1::PodTemplateSpec;
use crate::schema::meta_v1::{LabelSelector, ObjectMeta};
use serde::Deserialize;

/// The v1beta1 StatefulSet carries no fields beyond the ones read from `apps/v1`.
pub use crate::schema::apps_v1::StatefulSet;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Deployment {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: DeploymentSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    #[serde(default)]
    pub replicas: Option<i32>,
    /// Optional before `apps/v1`; defaulted from the template labels by the API server.
    #[serde(default)]
    pub selector: Option<LabelSelector>,
    #[serde(default)]
    pub template: PodTemplateSpec,
    #[serde(default)]
    pub rollback_to: Option<RollbackConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RollbackConfig {
    #[serde(default)]
    pub revision: Option<i64>,
}
