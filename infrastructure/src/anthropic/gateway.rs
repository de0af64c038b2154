//! Anthropic LLM Gateway implementation

use super::session::{AnthropicSession, Endpoint};
use crate::config::{ConfigError, FileAnthropicConfig};
use async_trait::async_trait;
use consult_application::ports::llm_gateway::{
    GatewayError, LlmGateway, LlmSession, SamplingParams,
};
use consult_domain::Model;
use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// LLM Gateway implementation for the Anthropic Messages API
///
/// The HTTP client is built on first use and then shared by every
/// session, so concurrent specialist calls reuse one connection pool.
pub struct AnthropicLlmGateway {
    endpoint: Arc<Endpoint>,
    client: OnceCell<reqwest::Client>,
    #[cfg(test)]
    client_builds: AtomicUsize,
}

impl AnthropicLlmGateway {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: Arc::new(Endpoint {
                url: format!("{}/v1/messages", base_url.trim_end_matches('/')),
                api_key: api_key.into(),
                api_version: api_version.into(),
            }),
            client: OnceCell::new(),
            #[cfg(test)]
            client_builds: AtomicUsize::new(0),
        }
    }

    /// Create a gateway from the `[providers.anthropic]` section
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &FileAnthropicConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ConfigError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;

        let gateway = Self::new(api_key, &config.base_url, config.api_version.clone());
        info!(url = %gateway.endpoint.url, "AnthropicLlmGateway initialized");
        Ok(gateway)
    }

    /// Messages endpoint URL
    pub fn url(&self) -> &str {
        &self.endpoint.url
    }

    async fn client(&self) -> Result<&reqwest::Client, GatewayError> {
        self.client
            .get_or_try_init(|| async move {
                debug!("Building HTTP client");
                #[cfg(test)]
                self.client_builds.fetch_add(1, Ordering::SeqCst);
                reqwest::Client::builder()
                    .build()
                    .map_err(|e| GatewayError::ConnectionError(e.to_string()))
            })
            .await
    }
}

#[async_trait]
impl LlmGateway for AnthropicLlmGateway {
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        sampling: SamplingParams,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        if !model.is_claude() {
            warn!(model = %model, "Model does not look like a Claude model");
        }
        let client = self.client().await?.clone();

        Ok(Box::new(AnthropicSession::new(
            client,
            Arc::clone(&self.endpoint),
            model.clone(),
            system_prompt.to_string(),
            sampling,
        )))
    }
}
