//! `extensions/v1beta1`, the pre-`apps` home of Deployment, DaemonSet and
//! NetworkPolicy.

use crate::schema::core_v1::PodTemplateSpec;
use crate::schema::meta_v1::{LabelSelector, ObjectMeta};
use serde::Deserialize;

pub use crate::schema::apps_v1beta1::Deployment;
pub use crate::schema::networking_v1::NetworkPolicy;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaemonSet {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: DaemonSetSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetSpec {
    #[serde(default)]
    pub selector: Option<LabelSelector>,
    #[serde(default)]
    pub template: PodTemplateSpec,
    #[serde(default)]
    pub template_generation: Option<i64>,
}
