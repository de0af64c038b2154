//! Execution parameters for invocation control.
//!
//! [`ExecutionParams`] groups the static parameters applied to every
//! text-generation call made by
//! [`RunConsultationUseCase`](crate::use_cases::run_consultation::RunConsultationUseCase).
//! These are application-layer concerns, not domain policy.

use crate::ports::llm_gateway::SamplingParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for a single backoff delay
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Invocation control parameters.
///
/// Timeout and retry are opt-in: by default a call runs until the backend
/// answers and any failure aborts the consultation immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum output tokens per call.
    pub max_tokens: u32,
    /// Sampling temperature per call.
    pub temperature: f32,
    /// Deadline for a single call (session creation + send).
    pub invocation_timeout: Option<Duration>,
    /// Additional attempts for retryable failures (rate limit, network, timeout).
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further attempt.
    pub retry_base_delay: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        let sampling = SamplingParams::default();
        Self {
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
            invocation_timeout: None,
            max_retries: 0,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_invocation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.invocation_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    // ==================== Derived Values ====================

    /// Generation settings handed to the gateway
    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Backoff before retry number `attempt` (0-based), capped at 30s
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.retry_base_delay
            .checked_mul(factor)
            .unwrap_or(MAX_RETRY_DELAY)
            .min(MAX_RETRY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_tokens, 1024);
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
        assert!(params.invocation_timeout.is_none());
        assert_eq!(params.max_retries, 0);
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_max_tokens(2048)
            .with_temperature(0.2)
            .with_invocation_timeout(Some(Duration::from_secs(60)))
            .with_max_retries(3);

        assert_eq!(params.sampling().max_tokens, 2048);
        assert!((params.sampling().temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(params.invocation_timeout, Some(Duration::from_secs(60)));
        assert_eq!(params.max_retries, 3);
    }

    #[test]
    fn test_retry_delay_doubles_and_caps() {
        let params = ExecutionParams::default().with_retry_base_delay(Duration::from_millis(500));
        assert_eq!(params.retry_delay(0), Duration::from_millis(500));
        assert_eq!(params.retry_delay(1), Duration::from_secs(1));
        assert_eq!(params.retry_delay(2), Duration::from_secs(2));
        assert_eq!(params.retry_delay(10), MAX_RETRY_DELAY);
        assert_eq!(params.retry_delay(40), MAX_RETRY_DELAY);
    }
}
