//! # kube-scorecard
//!
//! Static analysis of Kubernetes manifests. Every object in a batch of YAML
//! documents is decoded into a canonical shape and graded by a catalogue of
//! checks covering resource limits, security contexts, probes, network
//! policies and disruption budgets. No cluster access is needed.
//!
//! ## Pipeline
//!
//! 1. [`parser`] splits files into documents and detects `apiVersion`/`kind`
//! 2. [`context::decode`] normalises every supported schema version
//! 3. [`context::ResourceIndex`] freezes the decoded set for relationship checks
//! 4. [`score`] runs the [`checks::Registry`] and builds a [`Scorecard`]
//! 5. [`formatter`] renders the scorecard
//!
//! ## Example
//!
//! ```rust,no_run
//! use kube_scorecard::{ScoreConfig, parser, score};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let docs = parser::load_paths(&[PathBuf::from("deploy.yaml")])?;
//! let scorecard = score::score_documents(&docs, &ScoreConfig::default())?;
//! for object in &scorecard {
//!     println!("{}: {:?}", object.display_name(), object.worst_grade());
//! }
//! # Ok(())
//! # }
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod formatter;
pub mod objectkinds;
pub mod parser;
pub mod pragma;
pub mod schema;
pub mod score;
pub mod scorecard;
pub mod types;

pub use checks::{Check, CheckFunc, Evaluation, Registry};
pub use config::{DecodePolicy, ScoreConfig};
pub use context::{Resource, ResourceIndex};
pub use error::{DecodeError, Result, ScoreError};
pub use score::{score_documents, score_index};
pub use scorecard::{ObjectKey, Outcome, ScoredObject, Scorecard};
pub use types::{Comment, Grade, ObjectMeta, TargetShape, TypeMeta, WorkloadKind};

/// The current version of the tool.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
