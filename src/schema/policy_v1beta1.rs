//! `policy/v1beta1` PodDisruptionBudget. Same shape as `policy/v1`.

pub use crate::schema::policy_v1::PodDisruptionBudget;
