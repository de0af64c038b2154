//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for consultation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Consensus, agreement and every specialist opinion
    Full,
    /// Only the consensus
    Summary,
    /// JSON response
    Json,
}

impl From<OutputFormat> for consult_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => consult_domain::OutputFormat::Full,
            OutputFormat::Summary => consult_domain::OutputFormat::Summary,
            OutputFormat::Json => consult_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for derma-consult
#[derive(Parser, Debug)]
#[command(name = "derma-consult")]
#[command(
    author,
    version,
    about = "Multi-specialist consultation on a skin-lesion diagnosis"
)]
#[command(long_about = r#"
derma-consult asks a panel of specialist personas to review a candidate
skin-lesion diagnosis and merges their opinions into one consensus.

The process has two stages:
1. Specialist Review: every specialist assesses the case in parallel
2. Coordinator Synthesis: a coordinator merges the opinions into a consensus

The request is JSON: { "diagnosisResult": {...}, "patientContext": {...} }
read from a file, or from stdin when the path is omitted or "-".

Configuration files are loaded from (in priority order):
1. CONSULT_* environment variables
2. --config <path>     Explicit config file
3. ./consult.toml      Project-level config
4. ~/.config/derma-consult/config.toml   Global config

Example:
  derma-consult case.json
  derma-consult -o json --retries 2 < case.json
  derma-consult --model claude-opus-4.5 -o summary case.json
"#)]
pub struct Cli {
    /// Path to the consultation request JSON ("-" or omitted reads stdin)
    #[arg(value_name = "REQUEST")]
    pub request: Option<PathBuf>,

    /// Output format (defaults to the configured format, then "full")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Model for every specialist
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Model for the coordinator (defaults to --model)
    #[arg(long, value_name = "MODEL")]
    pub coordinator_model: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Retries for rate-limited or failed connections
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Request path, or `None` when the request comes from stdin
    pub fn request_path(&self) -> Option<&PathBuf> {
        self.request
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
    }
}
