//! `[output]` section: how a finished consultation is shown

use consult_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Rendering preferences for the consultation report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Report layout when `--output` is not given
    pub format: Option<OutputFormat>,
    /// Color urgency and agreement in the terminal report
    pub color: bool,
    /// Show per-specialist progress on stderr while the panel runs
    pub progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            progress: true,
        }
    }
}

impl FileOutputConfig {
    /// Format for this run: the command-line choice, then the configured
    /// one, then the full report.
    pub fn resolve_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.or(self.format).unwrap_or_default()
    }
}
