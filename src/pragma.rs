//! Annotation-based per-resource overrides.
//!
//! - `kube-score/ignore: id1,id2` skips checks for one resource
//! - `kube-score/enable: id1,id2` turns optional checks on for one resource

use crate::types::ObjectMeta;
use std::collections::BTreeSet;

/// Annotation listing check ids to skip for the annotated resource.
pub const IGNORE_ANNOTATION: &str = "kube-score/ignore";

/// Annotation listing optional check ids to run for the annotated resource.
pub const ENABLE_ANNOTATION: &str = "kube-score/enable";

/// Check ids the resource asks to skip.
pub fn ignored_checks(meta: &ObjectMeta) -> BTreeSet<String> {
    annotation_list(meta, IGNORE_ANNOTATION)
}

/// Optional check ids the resource asks to enable.
pub fn enabled_checks(meta: &ObjectMeta) -> BTreeSet<String> {
    annotation_list(meta, ENABLE_ANNOTATION)
}

fn annotation_list(meta: &ObjectMeta, key: &str) -> BTreeSet<String> {
    meta.annotations
        .get(key)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
