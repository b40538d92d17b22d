//! Check definitions and the check registry.
//!
//! A check is registered against exactly one target shape, and its
//! evaluation function has the signature of that shape. The engine can only
//! hand a check the kind of resource it was written for.

pub mod builtin;
pub mod container;
pub mod disruptionbudget;
pub mod networkpolicy;
pub mod probes;
pub mod security;
pub mod service;
pub mod stable;

use crate::config::ScoreConfig;
use crate::context::{NetworkPolicy, PodTemplate, Resource, ResourceIndex, Service, Workload};
use crate::error::RegistryError;
use crate::types::{Comment, Grade, ObjectMeta, TargetShape, TypeMeta, WorkloadKind};

/// Grade and comments returned by one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub grade: Grade,
    pub comments: Vec<Comment>,
}

impl Evaluation {
    pub fn new(grade: Grade) -> Self {
        Self {
            grade,
            comments: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(Grade::AllOK)
    }

    pub fn add_comment(
        &mut self,
        path: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.comments.push(Comment::new(path, summary, description));
    }

    pub fn with_comment(
        mut self,
        path: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.add_comment(path, summary, description);
        self
    }
}

/// Checks against the identity of any resource.
pub trait MetadataCheck: Send + Sync {
    fn evaluate(&self, type_meta: &TypeMeta, meta: &ObjectMeta) -> Evaluation;
}

/// Checks against a pod template, from a bare pod or a workload.
pub trait PodTemplateCheck: Send + Sync {
    fn evaluate(&self, template: &PodTemplate, index: &ResourceIndex) -> Evaluation;
}

pub trait ServiceCheck: Send + Sync {
    fn evaluate(&self, service: &Service, index: &ResourceIndex) -> Evaluation;
}

pub trait NetworkPolicyCheck: Send + Sync {
    fn evaluate(&self, policy: &NetworkPolicy, index: &ResourceIndex) -> Evaluation;
}

pub trait WorkloadCheck: Send + Sync {
    fn evaluate(&self, workload: &Workload, index: &ResourceIndex) -> Evaluation;
}

/// An evaluation function tagged with the shape it accepts.
pub enum CheckFunc {
    Metadata(Box<dyn MetadataCheck>),
    PodTemplate(Box<dyn PodTemplateCheck>),
    Service(Box<dyn ServiceCheck>),
    NetworkPolicy(Box<dyn NetworkPolicyCheck>),
    Workload(WorkloadKind, Box<dyn WorkloadCheck>),
}

impl CheckFunc {
    pub fn target(&self) -> TargetShape {
        match self {
            Self::Metadata(_) => TargetShape::Metadata,
            Self::PodTemplate(_) => TargetShape::PodTemplate,
            Self::Service(_) => TargetShape::Service,
            Self::NetworkPolicy(_) => TargetShape::NetworkPolicy,
            Self::Workload(kind, _) => TargetShape::Workload(*kind),
        }
    }
}

impl std::fmt::Debug for CheckFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckFunc({})", self.target())
    }
}

/// One registered rule.
#[derive(Debug)]
pub struct Check {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Optional checks only run when enabled by configuration or annotation.
    pub optional: bool,
    func: CheckFunc,
}

impl Check {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        func: CheckFunc,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            optional: false,
            func,
        }
    }

    /// Mark the check as off by default.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn target(&self) -> TargetShape {
        self.func.target()
    }

    /// Whether the resource has the shape this check is registered against.
    pub fn applies_to(&self, resource: &Resource) -> bool {
        match (&self.func, resource) {
            (CheckFunc::Metadata(_), _) => true,
            (CheckFunc::PodTemplate(_), r) => r.pod_template().is_some(),
            (CheckFunc::Service(_), Resource::Service(_)) => true,
            (CheckFunc::NetworkPolicy(_), Resource::NetworkPolicy(_)) => true,
            (CheckFunc::Workload(kind, _), Resource::Workload(w)) => w.kind == *kind,
            _ => false,
        }
    }

    /// Run the evaluation function. `None` when the shapes do not match; the
    /// function is not invoked in that case.
    pub fn evaluate(&self, resource: &Resource, index: &ResourceIndex) -> Option<Evaluation> {
        match (&self.func, resource) {
            (CheckFunc::Metadata(f), r) => Some(f.evaluate(r.type_meta(), r.object_meta())),
            (CheckFunc::PodTemplate(f), r) => r.pod_template().map(|t| f.evaluate(t, index)),
            (CheckFunc::Service(f), Resource::Service(s)) => Some(f.evaluate(s, index)),
            (CheckFunc::NetworkPolicy(f), Resource::NetworkPolicy(n)) => Some(f.evaluate(n, index)),
            (CheckFunc::Workload(kind, f), Resource::Workload(w)) if w.kind == *kind => {
                Some(f.evaluate(w, index))
            }
            _ => None,
        }
    }
}

/// The ordered catalogue of checks for a run.
///
/// Built once and passed by reference to the engine; there is no global
/// registration state.
#[derive(Debug, Default)]
pub struct Registry {
    checks: Vec<Check>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in checks, configured for this run.
    pub fn builtin(config: &ScoreConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for check in builtin::builtin_checks(config) {
            registry.register(check)?;
        }
        Ok(registry)
    }

    /// Append a check. Ids must be unique.
    pub fn register(&mut self, check: Check) -> Result<(), RegistryError> {
        if self.get(&check.id).is_some() {
            return Err(RegistryError::DuplicateCheckId(check.id));
        }
        self.checks.push(check);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.id == id)
    }

    /// Checks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::object::MetadataOnly;

    struct AlwaysWarn;

    impl MetadataCheck for AlwaysWarn {
        fn evaluate(&self, _type_meta: &TypeMeta, meta: &ObjectMeta) -> Evaluation {
            Evaluation::new(Grade::Warning).with_comment(&meta.name, "warned", "")
        }
    }

    struct Unreachable;

    impl ServiceCheck for Unreachable {
        fn evaluate(&self, _service: &Service, _index: &ResourceIndex) -> Evaluation {
            panic!("service check invoked on a non-service");
        }
    }

    fn config_map() -> Resource {
        Resource::MetadataOnly(MetadataOnly {
            type_meta: TypeMeta::new("v1", "ConfigMap"),
            meta: ObjectMeta::new("settings"),
        })
    }

    #[test]
    fn test_register_rejects_duplicate_ids() {
        let mut registry = Registry::new();
        registry
            .register(Check::new("a", "A", "", CheckFunc::Metadata(Box::new(AlwaysWarn))))
            .unwrap();
        let err = registry
            .register(Check::new("a", "A again", "", CheckFunc::Metadata(Box::new(AlwaysWarn))))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCheckId("a".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_shape_mismatch_is_never_invoked() {
        let index = ResourceIndex::default();
        let check = Check::new("svc", "Svc", "", CheckFunc::Service(Box::new(Unreachable)));
        let resource = config_map();
        assert!(!check.applies_to(&resource));
        assert!(check.evaluate(&resource, &index).is_none());
    }

    #[test]
    fn test_metadata_check_applies_to_everything() {
        let index = ResourceIndex::default();
        let check = Check::new("meta", "Meta", "", CheckFunc::Metadata(Box::new(AlwaysWarn)));
        let evaluation = check.evaluate(&config_map(), &index).unwrap();
        assert_eq!(evaluation.grade, Grade::Warning);
        assert_eq!(evaluation.comments[0].path, "settings");
        assert_eq!(check.target(), TargetShape::Metadata);
    }

    #[test]
    fn test_builtin_registry_ids_are_unique() {
        let registry = Registry::builtin(&ScoreConfig::default()).unwrap();
        assert_eq!(registry.len(), 13);
        let optional: Vec<&str> = registry
            .iter()
            .filter(|c| c.optional)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(
            optional,
            vec![
                "container-resource-requests-equal-limits",
                "container-seccomp-profile"
            ]
        );
    }
}
