//! The scorecard: every outcome of a run, grouped by resource.
//!
//! Objects appear in decode order and outcomes in check-registration order.
//! The scorecard is append-only while the engine fills it and read-only for
//! reporters afterwards.

use crate::checks::Check;
use crate::types::{Comment, Grade, ObjectMeta, TypeMeta};
use serde::Serialize;
use std::fmt;

/// The check an outcome belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub optional: bool,
}

impl From<&Check> for CheckRef {
    fn from(check: &Check) -> Self {
        Self {
            id: check.id.clone(),
            name: check.name.clone(),
            description: check.description.clone(),
            optional: check.optional,
        }
    }
}

/// The result of one check against one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub check: CheckRef,
    pub grade: Grade,
    /// Set when the check did not evaluate the resource. The grade is then
    /// `Skipped`, or `AllOK` for resources in ignored namespaces.
    pub skipped: bool,
    pub comments: Vec<Comment>,
}

impl Outcome {
    pub fn evaluated(check: &Check, grade: Grade, comments: Vec<Comment>) -> Self {
        Self {
            check: check.into(),
            grade,
            skipped: false,
            comments,
        }
    }

    pub fn skipped(check: &Check, grade: Grade) -> Self {
        Self {
            check: check.into(),
            grade,
            skipped: true,
            comments: Vec::new(),
        }
    }
}

/// Identity of a scored resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectKey {
    pub api_version: String,
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(type_meta: &TypeMeta, meta: &ObjectMeta) -> Self {
        Self {
            api_version: type_meta.api_version.clone(),
            kind: type_meta.kind.clone(),
            namespace: meta.namespace.clone(),
            name: meta.name.clone(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {} in {}",
            self.api_version, self.kind, self.name, self.namespace
        )
    }
}

/// One resource and its outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredObject {
    pub type_meta: TypeMeta,
    pub object_meta: ObjectMeta,
    pub outcomes: Vec<Outcome>,
}

impl ScoredObject {
    pub fn new(type_meta: TypeMeta, object_meta: ObjectMeta) -> Self {
        Self {
            type_meta,
            object_meta,
            outcomes: Vec::new(),
        }
    }

    pub fn add(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(&self.type_meta, &self.object_meta)
    }

    /// `apiVersion/Kind name in namespace`.
    pub fn display_name(&self) -> String {
        self.key().to_string()
    }

    pub fn outcome(&self, check_id: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.check.id == check_id)
    }

    /// Worst grade among outcomes that were not skipped.
    pub fn worst_grade(&self) -> Option<Grade> {
        self.outcomes
            .iter()
            .filter(|o| !o.skipped)
            .map(|o| o.grade)
            .min()
    }
}

/// All scored resources of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Scorecard {
    objects: Vec<ScoredObject>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, object: ScoredObject) {
        self.objects.push(object);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// First object with this identity.
    pub fn get(&self, key: &ObjectKey) -> Option<&ScoredObject> {
        self.objects.iter().find(|o| &o.key() == key)
    }

    /// Worst non-skipped grade across the whole run.
    pub fn worst_grade(&self) -> Option<Grade> {
        self.objects.iter().filter_map(ScoredObject::worst_grade).min()
    }
}

impl<'a> IntoIterator for &'a Scorecard {
    type Item = &'a ScoredObject;
    type IntoIter = std::slice::Iter<'a, ScoredObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
