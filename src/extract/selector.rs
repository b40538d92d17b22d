//! Label selector compilation and matching.
//!
//! One implementation shared by every relationship check: a selector is
//! compiled once, then evaluated against plain label maps. A selector that
//! fails to compile matches nothing.

use crate::schema::meta_v1::LabelSelector;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use thiserror::Error;

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").expect("label name pattern")
});

static PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("label prefix pattern")
});

const MAX_NAME_LEN: usize = 63;
const MAX_PREFIX_LEN: usize = 253;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("invalid label key '{0}'")]
    InvalidKey(String),
    #[error("invalid label value '{value}' for key '{key}'")]
    InvalidValue { key: String, value: String },
    #[error("unknown selector operator '{0}'")]
    UnknownOperator(String),
    #[error("operator {operator} on key '{key}' requires at least one value")]
    MissingValues { key: String, operator: String },
    #[error("operator {operator} on key '{key}' does not take values")]
    UnexpectedValues { key: String, operator: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Requirement {
    key: String,
    operator: Operator,
    values: BTreeSet<String>,
}

impl Requirement {
    fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        match self.operator {
            Operator::In => labels
                .get(&self.key)
                .is_some_and(|v| self.values.contains(v)),
            Operator::NotIn => labels
                .get(&self.key)
                .is_none_or(|v| !self.values.contains(v)),
            Operator::Exists => labels.contains_key(&self.key),
            Operator::DoesNotExist => !labels.contains_key(&self.key),
        }
    }
}

/// A compiled label selector. Requirements are ANDed; no requirements
/// matches every label set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    requirements: Vec<Requirement>,
}

impl Selector {
    /// Compile a `matchLabels` / `matchExpressions` selector.
    pub fn compile(selector: &LabelSelector) -> Result<Self, SelectorError> {
        let mut requirements = Vec::new();

        if let Some(match_labels) = &selector.match_labels {
            for (key, value) in match_labels {
                validate_key(key)?;
                validate_value(key, value)?;
                requirements.push(Requirement {
                    key: key.clone(),
                    operator: Operator::In,
                    values: BTreeSet::from([value.clone()]),
                });
            }
        }

        for expr in selector.match_expressions.iter().flatten() {
            validate_key(&expr.key)?;
            let operator = match expr.operator.as_str() {
                "In" => Operator::In,
                "NotIn" => Operator::NotIn,
                "Exists" => Operator::Exists,
                "DoesNotExist" => Operator::DoesNotExist,
                other => return Err(SelectorError::UnknownOperator(other.to_string())),
            };
            let values: BTreeSet<String> = expr.values.iter().flatten().cloned().collect();

            match operator {
                Operator::In | Operator::NotIn if values.is_empty() => {
                    return Err(SelectorError::MissingValues {
                        key: expr.key.clone(),
                        operator: expr.operator.clone(),
                    });
                }
                Operator::Exists | Operator::DoesNotExist if !values.is_empty() => {
                    return Err(SelectorError::UnexpectedValues {
                        key: expr.key.clone(),
                        operator: expr.operator.clone(),
                    });
                }
                _ => {}
            }
            for value in &values {
                validate_value(&expr.key, value)?;
            }

            requirements.push(Requirement {
                key: expr.key.clone(),
                operator,
                values,
            });
        }

        Ok(Self { requirements })
    }

    /// True if the selector has no requirements and therefore selects everything.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements.iter().all(|r| r.matches(labels))
    }
}

/// Evaluate a raw selector against a label set. Invalid selectors match nothing.
pub fn selector_matches(selector: &LabelSelector, labels: &BTreeMap<String, String>) -> bool {
    match Selector::compile(selector) {
        Ok(compiled) => compiled.matches(labels),
        Err(e) => {
            log::debug!("treating invalid selector as non-matching: {}", e);
            false
        }
    }
}

fn validate_key(key: &str) -> Result<(), SelectorError> {
    let invalid = || SelectorError::InvalidKey(key.to_string());
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    if let Some(prefix) = prefix
        && (prefix.is_empty() || prefix.len() > MAX_PREFIX_LEN || !PREFIX_REGEX.is_match(prefix))
    {
        return Err(invalid());
    }
    if name.is_empty() || name.len() > MAX_NAME_LEN || !NAME_REGEX.is_match(name) {
        return Err(invalid());
    }
    Ok(())
}

fn validate_value(key: &str, value: &str) -> Result<(), SelectorError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > MAX_NAME_LEN || !NAME_REGEX.is_match(value) {
        return Err(SelectorError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}
