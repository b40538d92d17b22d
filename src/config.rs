//! Run configuration.
//!
//! Mirrors the knobs exposed on the command line:
//! - namespaces whose resources are scored but never fail
//! - optional checks to switch on, checks to force-skip
//! - annotation overrides and container limit requirements
//! - the policy for documents that fail to decode

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// What to do with a document that matches an adapter but fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Fail the whole run; no scorecard is produced.
    #[default]
    Abort,
    /// Log the document and continue with the rest of the batch.
    Skip,
}

/// Configuration for a scoring run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreConfig {
    /// Resources in these namespaces get forced skipped/AllOK outcomes.
    #[serde(default)]
    pub ignored_namespaces: BTreeSet<String>,

    /// Optional check ids to run.
    #[serde(default)]
    pub enabled_optional_tests: BTreeSet<String>,

    /// Check ids forced to Skipped for every resource.
    #[serde(default)]
    pub ignored_tests: BTreeSet<String>,

    /// Verbosity of diagnostics about unrecognized kinds. Does not affect grading.
    #[serde(default)]
    pub verbose: u8,

    /// Honour `kube-score/ignore` annotations on resources.
    #[serde(default = "default_true")]
    pub use_ignore_checks_annotation: bool,

    /// Honour `kube-score/enable` annotations on resources.
    #[serde(default = "default_true")]
    pub use_optional_checks_annotation: bool,

    #[serde(default)]
    pub ignore_container_cpu_limit_requirement: bool,

    #[serde(default)]
    pub ignore_container_memory_limit_requirement: bool,

    #[serde(default)]
    pub on_decode_error: DecodePolicy,

    /// Evaluate resources on the rayon thread pool.
    #[serde(default = "default_true")]
    pub parallel: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            ignored_namespaces: BTreeSet::new(),
            enabled_optional_tests: BTreeSet::new(),
            ignored_tests: BTreeSet::new(),
            verbose: 0,
            use_ignore_checks_annotation: true,
            use_optional_checks_annotation: true,
            ignore_container_cpu_limit_requirement: false,
            ignore_container_memory_limit_requirement: false,
            on_decode_error: DecodePolicy::Abort,
            parallel: true,
        }
    }
}

impl ScoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.ignored_namespaces.insert(namespace.into());
        self
    }

    pub fn enable_optional(mut self, check_id: impl Into<String>) -> Self {
        self.enabled_optional_tests.insert(check_id.into());
        self
    }

    pub fn ignore_test(mut self, check_id: impl Into<String>) -> Self {
        self.ignored_tests.insert(check_id.into());
        self
    }

    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.on_decode_error = policy;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn is_namespace_ignored(&self, namespace: &str) -> bool {
        self.ignored_namespaces.contains(namespace)
    }

    pub fn is_test_ignored(&self, check_id: &str) -> bool {
        self.ignored_tests.contains(check_id)
    }

    pub fn is_optional_enabled(&self, check_id: &str) -> bool {
        self.enabled_optional_tests.contains(check_id)
    }

    /// Load configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::load_from_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Try to load config from default locations (.kube-score.yaml, .kube-score.yml).
    pub fn load_from_default() -> Option<Self> {
        for filename in &[".kube-score.yaml", ".kube-score.yml"] {
            let path = Path::new(filename);
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(config) => return Some(config),
                    Err(e) => log::warn!("ignoring {}: {}", filename, e),
                }
            }
        }
        None
    }
}
