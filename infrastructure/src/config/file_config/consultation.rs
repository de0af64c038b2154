//! Consultation settings from TOML (`[consultation]` section)

use consult_application::ExecutionParams;
use consult_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw consultation configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsultationConfig {
    /// Model backing every specialist
    pub model: Model,
    /// Model backing the coordinator (defaults to `model`)
    pub coordinator_model: Option<Model>,
    /// Maximum output tokens per call
    pub max_tokens: u32,
    /// Sampling temperature per call
    pub temperature: f32,
    /// Per-call deadline in seconds (none by default)
    pub timeout_secs: Option<u64>,
    /// Additional attempts for transient failures
    pub max_retries: u32,
    /// First retry delay in milliseconds; doubles per attempt
    pub retry_base_delay_ms: u64,
}

impl Default for FileConsultationConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            model: Model::default(),
            coordinator_model: None,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            timeout_secs: None,
            max_retries: params.max_retries,
            retry_base_delay_ms: params.retry_base_delay.as_millis() as u64,
        }
    }
}

impl FileConsultationConfig {
    /// Model used for the synthesis stage
    pub fn coordinator_model(&self) -> Model {
        self.coordinator_model
            .clone()
            .unwrap_or_else(|| self.model.clone())
    }

    /// Convert to application-layer invocation parameters
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_invocation_timeout(self.timeout_secs.map(Duration::from_secs))
            .with_max_retries(self.max_retries)
            .with_retry_base_delay(Duration::from_millis(self.retry_base_delay_ms))
    }
}
