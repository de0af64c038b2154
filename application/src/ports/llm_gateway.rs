//! LLM Gateway port
//!
//! Defines the interface for communicating with text-generation backends.

use async_trait::async_trait;
use consult_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Server-side 5xx, including the API's 529 "overloaded"
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty completion")]
    EmptyCompletion,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Transient failures that may succeed when attempted again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimited(_)
                | GatewayError::Unavailable(_)
                | GatewayError::ConnectionError(_)
                | GatewayError::Timeout
        )
    }
}

/// Fixed generation settings applied to every call in a consultation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    /// Maximum output length in tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with
/// text-generation backends. Implementations (adapters) live in the
/// infrastructure layer. A single gateway is shared by every concurrent
/// invocation of a consultation, so implementations must be safe to call
/// from many tasks at once.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Open a session for one persona
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        sampling: SamplingParams,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session bound to one persona
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send one user message and get the completion text
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}
