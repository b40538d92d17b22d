//! Core types shared by the normalizer, the checks and the scorecard.
//!
//! - `Grade` - outcome severity of one check against one resource
//! - `TypeMeta` / `ObjectMeta` - identity of a decoded resource
//! - `Comment` - a single finding attached to an outcome
//! - `TargetShape` - which canonical shape a check is registered against

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Namespace assigned to resources that do not declare one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Grade of a single check outcome.
///
/// Ordered from worst to best for comparisons:
/// `Critical < Warning < AllOK`. `Skipped` sorts above everything so that
/// skipped outcomes never become the worst grade of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    Critical,
    Warning,
    #[serde(rename = "OK")]
    AllOK,
    Skipped,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::AllOK => "OK",
            Self::Skipped => "SKIPPED",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Warning => 1,
            Self::AllOK => 2,
            Self::Skipped => 3,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Ord for Grade {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `{apiVersion, kind}` of a decoded document. Set once at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    pub api_version: String,
    pub kind: String,
}

impl TypeMeta {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
        }
    }
}

impl fmt::Display for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version, self.kind)
    }
}

/// Identity metadata of a decoded resource.
///
/// `namespace` is always populated; documents without one get
/// [`DEFAULT_NAMESPACE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

impl Default for ObjectMeta {
    fn default() -> Self {
        Self::new("")
    }
}

/// A single finding produced by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Where in the resource the finding applies, usually a container name.
    pub path: String,
    pub summary: String,
    pub description: String,
}

impl Comment {
    pub fn new(
        path: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            summary: summary.into(),
            description: description.into(),
        }
    }
}

/// Workload kinds that own a pod template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
    DaemonSet,
    Job,
    CronJob,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
            Self::DaemonSet => "DaemonSet",
            Self::Job => "Job",
            Self::CronJob => "CronJob",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The canonical shape a check is registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetShape {
    /// Every decoded resource.
    Metadata,
    /// Bare pods and the pod template of every workload.
    PodTemplate,
    Service,
    NetworkPolicy,
    /// Workloads of exactly one kind.
    Workload(WorkloadKind),
}

impl fmt::Display for TargetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata => write!(f, "metadata"),
            Self::PodTemplate => write!(f, "pod-template"),
            Self::Service => write!(f, "service"),
            Self::NetworkPolicy => write!(f, "network-policy"),
            Self::Workload(kind) => write!(f, "workload/{}", kind),
        }
    }
}
