//! `policy/v1` PodDisruptionBudget.

use crate::schema::meta_v1::{LabelSelector, ObjectMeta};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodDisruptionBudget {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PodDisruptionBudgetSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodDisruptionBudgetSpec {
    /// A missing selector selects no pods.
    #[serde(default)]
    pub selector: Option<LabelSelector>,
    #[serde(default)]
    pub min_available: Option<serde_yaml::Value>,
    #[serde(default)]
    pub max_unavailable: Option<serde_yaml::Value>,
}
