use crate::config::{DecodePolicy, ScoreConfig};
use crate::error::ConfigError;
use crate::formatter::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kube-scorecard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Score Kubernetes manifests against reliability and security best practices")]
#[command(long_about = "Statically analyzes Kubernetes manifests and grades every object against a catalogue of checks covering resource limits, security contexts, probes, network policies and disruption budgets. Nothing is sent to a cluster.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score manifests read from files, directories or stdin
    Score(ScoreArgs),

    /// List every available check
    List,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Manifest files or directories to score; `-` reads stdin
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Skip a check for every object (repeatable)
    #[arg(long = "ignore-test", value_name = "ID")]
    pub ignore_tests: Vec<String>,

    /// Turn on an optional check (repeatable)
    #[arg(long = "enable-optional-test", value_name = "ID")]
    pub enable_optional_tests: Vec<String>,

    /// Score objects in this namespace as skipped (repeatable)
    #[arg(long = "ignore-namespace", value_name = "NAMESPACE")]
    pub ignore_namespaces: Vec<String>,

    /// Do not require CPU limits on containers
    #[arg(long)]
    pub ignore_container_cpu_limit: bool,

    /// Do not require memory limits on containers
    #[arg(long)]
    pub ignore_container_memory_limit: bool,

    /// Ignore kube-score/ignore annotations on objects
    #[arg(long)]
    pub disable_ignore_checks_annotations: bool,

    /// Ignore kube-score/enable annotations on objects
    #[arg(long)]
    pub disable_optional_checks_annotations: bool,

    /// Skip documents that fail to decode instead of failing the run
    #[arg(long)]
    pub skip_invalid: bool,

    /// Exit with status 1 when any check reports a warning
    #[arg(long)]
    pub exit_one_on_warning: bool,

    /// Score objects on a single thread
    #[arg(long)]
    pub no_parallel: bool,
}

impl ScoreArgs {
    /// Layer the command-line flags over a loaded configuration.
    pub fn apply(&self, mut config: ScoreConfig) -> ScoreConfig {
        config.ignored_tests.extend(self.ignore_tests.iter().cloned());
        config
            .enabled_optional_tests
            .extend(self.enable_optional_tests.iter().cloned());
        config
            .ignored_namespaces
            .extend(self.ignore_namespaces.iter().cloned());

        if self.ignore_container_cpu_limit {
            config.ignore_container_cpu_limit_requirement = true;
        }
        if self.ignore_container_memory_limit {
            config.ignore_container_memory_limit_requirement = true;
        }
        if self.disable_ignore_checks_annotations {
            config.use_ignore_checks_annotation = false;
        }
        if self.disable_optional_checks_annotations {
            config.use_optional_checks_annotation = false;
        }
        if self.skip_invalid {
            config.on_decode_error = DecodePolicy::Skip;
        }
        if self.no_parallel {
            config.parallel = false;
        }
        config
    }
}

impl Cli {
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }

    /// The configuration file named by `--config`, else the default
    /// locations, else built-in defaults. `verbose` follows `-v`.
    pub fn load_config(&self) -> Result<ScoreConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => ScoreConfig::load_from_file(path)?,
            None => ScoreConfig::load_from_default().unwrap_or_default(),
        };
        let verbose = self.verbose.max(config.verbose);
        Ok(config.with_verbose(verbose))
    }
}
