//! Anthropic LLM session implementation
//!
//! One session per persona: the system prompt and sampling settings are
//! fixed, and every `send` is an independent single-turn request.

use super::protocol::{Message, MessagesRequest, MessagesResponse, status_error};
use async_trait::async_trait;
use consult_application::ports::llm_gateway::{GatewayError, LlmSession, SamplingParams};
use consult_domain::Model;
use std::sync::Arc;
use tracing::debug;

/// Connection details shared by every session of a gateway
#[derive(Debug)]
pub(crate) struct Endpoint {
    pub url: String,
    pub api_key: String,
    pub api_version: String,
}

pub struct AnthropicSession {
    client: reqwest::Client,
    endpoint: Arc<Endpoint>,
    model: Model,
    system_prompt: String,
    sampling: SamplingParams,
}

impl AnthropicSession {
    pub(crate) fn new(
        client: reqwest::Client,
        endpoint: Arc<Endpoint>,
        model: Model,
        system_prompt: String,
        sampling: SamplingParams,
    ) -> Self {
        Self {
            client,
            endpoint,
            model,
            system_prompt,
            sampling,
        }
    }
}

#[async_trait]
impl LlmSession for AnthropicSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let request = MessagesRequest {
            model: self.model.as_str(),
            max_tokens: self.sampling.max_tokens,
            temperature: self.sampling.temperature,
            system: &self.system_prompt,
            messages: vec![Message::user(content)],
        };

        debug!(
            model = %self.model,
            bytes = content.len(),
            "Calling Anthropic Messages API"
        );

        let response = self
            .client
            .post(&self.endpoint.url)
            .header("x-api-key", &self.endpoint.api_key)
            .header("anthropic-version", &self.endpoint.api_version)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Invalid response body: {}", e)))?;

        debug!(
            model = %self.model,
            stop_reason = body.stop_reason.as_deref().unwrap_or("unknown"),
            "Anthropic response received"
        );

        body.first_text()
            .map(str::to_string)
            .ok_or(GatewayError::EmptyCompletion)
    }
}
