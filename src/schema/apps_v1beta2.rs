//! `apps/v1beta2` workloads. Wire-identical to `apps/v1` for the fields read here.

pub use crate::schema::apps_v1::{DaemonSet, Deployment, StatefulSet};
