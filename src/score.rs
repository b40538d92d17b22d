//! The scoring engine.
//!
//! Ties together decoding, the resource index, the check registry and the
//! per-resource skip rules to produce a [`Scorecard`].

use crate::checks::{Check, Registry};
use crate::config::{DecodePolicy, ScoreConfig};
use crate::context::decode::decode;
use crate::context::{Resource, ResourceIndex};
use crate::error::Result;
use crate::parser::RawDocument;
use crate::pragma;
use crate::scorecard::{Outcome, ScoredObject, Scorecard};
use crate::types::Grade;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Decode every document, index the results and score them with the
/// built-in registry.
///
/// Fails without a scorecard when a document cannot be decoded under
/// [`DecodePolicy::Abort`].
pub fn score_documents(docs: &[RawDocument], config: &ScoreConfig) -> Result<Scorecard> {
    let registry = Registry::builtin(config)?;
    let index = ResourceIndex::build(decode_documents(docs, config)?);
    Ok(score_index(&index, &registry, config))
}

/// Decode documents in order, dropping unrecognized kinds.
pub fn decode_documents(docs: &[RawDocument], config: &ScoreConfig) -> Result<Vec<Resource>> {
    let mut resources = Vec::with_capacity(docs.len());

    for doc in docs {
        match decode(doc) {
            Ok(Some(resource)) => resources.push(resource),
            Ok(None) => {
                if config.verbose >= 1 {
                    log::info!(
                        "Unknown datatype: {}/{} in {}",
                        doc.api_version,
                        doc.kind,
                        doc.source_name
                    );
                } else {
                    log::debug!(
                        "Unknown datatype: {}/{} in {}",
                        doc.api_version,
                        doc.kind,
                        doc.source_name
                    );
                }
            }
            Err(e) => match config.on_decode_error {
                DecodePolicy::Abort => return Err(e.into()),
                DecodePolicy::Skip => log::warn!("skipping document {}: {}", doc.index, e),
            },
        }
    }

    Ok(resources)
}

/// Score every resource of a frozen index.
///
/// Resources are evaluated in parallel when `config.parallel` is set; the
/// scorecard is always in decode order, with outcomes in registration order.
pub fn score_index(index: &ResourceIndex, registry: &Registry, config: &ScoreConfig) -> Scorecard {
    log::debug!(
        "scoring {} resources against {} checks",
        index.len(),
        registry.len()
    );

    let score_one = |resource: &Resource| score_resource(resource, index, registry, config);
    let objects: Vec<ScoredObject> = if config.parallel {
        index.resources().par_iter().map(score_one).collect()
    } else {
        index.resources().iter().map(score_one).collect()
    };

    let mut scorecard = Scorecard::new();
    for object in objects {
        scorecard.push(object);
    }
    scorecard
}

fn score_resource(
    resource: &Resource,
    index: &ResourceIndex,
    registry: &Registry,
    config: &ScoreConfig,
) -> ScoredObject {
    let meta = resource.object_meta();
    let overrides = Overrides::for_resource(resource, config);
    let mut object = ScoredObject::new(resource.type_meta().clone(), meta.clone());

    for check in registry.iter().filter(|c| c.applies_to(resource)) {
        if let Some(outcome) = score_check(check, resource, index, config, &overrides) {
            object.add(outcome);
        }
    }

    object
}

/// Decide whether and how a check runs against one resource.
fn score_check(
    check: &Check,
    resource: &Resource,
    index: &ResourceIndex,
    config: &ScoreConfig,
    overrides: &Overrides,
) -> Option<Outcome> {
    let enabled = !check.optional
        || config.is_optional_enabled(&check.id)
        || overrides.enabled.contains(&check.id);
    if !enabled {
        return None;
    }

    // An ignored namespace wins over ignored tests.
    if overrides.namespace_ignored {
        return Some(Outcome::skipped(check, Grade::AllOK));
    }

    if config.is_test_ignored(&check.id) || overrides.ignored.contains(&check.id) {
        return Some(Outcome::skipped(check, Grade::Skipped));
    }

    let evaluation = check.evaluate(resource, index)?;
    Some(Outcome::evaluated(check, evaluation.grade, evaluation.comments))
}

/// Per-resource skip and enable state.
struct Overrides {
    ignored: BTreeSet<String>,
    enabled: BTreeSet<String>,
    namespace_ignored: bool,
}

impl Overrides {
    fn for_resource(resource: &Resource, config: &ScoreConfig) -> Self {
        let meta = resource.object_meta();
        Self {
            ignored: if config.use_ignore_checks_annotation {
                pragma::ignored_checks(meta)
            } else {
                BTreeSet::new()
            },
            enabled: if config.use_optional_checks_annotation {
                pragma::enabled_checks(meta)
            } else {
                BTreeSet::new()
            },
            namespace_ignored: config.is_namespace_ignored(&meta.namespace),
        }
    }
}
