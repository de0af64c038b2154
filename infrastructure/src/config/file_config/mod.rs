//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod consultation;
mod output;
mod providers;
mod specialists;

pub use consultation::FileConsultationConfig;
pub use output::FileOutputConfig;
pub use providers::{FileAnthropicConfig, FileProvidersConfig};
pub use specialists::FileSpecialistConfig;

use consult_domain::SpecialistProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal problem found in the loaded configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted path of the offending field
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model and invocation settings
    pub consultation: FileConsultationConfig,
    /// Backend provider settings
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Roster override; empty means the built-in five-specialist roster
    pub specialists: Vec<FileSpecialistConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Every issue is a warning: the consultation still runs, using the
    /// values as given (out-of-range temperature) or skipping the entry
    /// (incomplete specialist).
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let temperature = self.consultation.temperature;
        if !(0.0..=1.0).contains(&temperature) {
            issues.push(ConfigIssue::new(
                "consultation.temperature",
                format!("{} is outside the range 0.0-1.0", temperature),
            ));
        }

        if self.consultation.max_tokens == 0 {
            issues.push(ConfigIssue::new(
                "consultation.max_tokens",
                "must be greater than 0",
            ));
        }

        if self.consultation.timeout_secs == Some(0) {
            issues.push(ConfigIssue::new(
                "consultation.timeout_secs",
                "0 expires every call immediately",
            ));
        }

        for (i, entry) in self.specialists.iter().enumerate() {
            if let Err(e) = SpecialistProfile::from(entry).validate() {
                issues.push(ConfigIssue::new(
                    format!("specialists[{}]", i),
                    format!("{}, entry skipped", e),
                ));
            }
        }

        issues
    }

    /// Specialist roster in reporting order.
    ///
    /// Incomplete entries are skipped. Without any `[[specialists]]` entries
    /// the built-in roster is used.
    pub fn roster(&self) -> Vec<SpecialistProfile> {
        if self.specialists.is_empty() {
            return SpecialistProfile::default_roster();
        }

        self.specialists
            .iter()
            .map(SpecialistProfile::from)
            .filter(|profile| profile.validate().is_ok())
            .collect()
    }
}
