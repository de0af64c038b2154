//! Single persona invocation.
//!
//! Wraps one prompted text-generation request: open a session under the
//! persona's system prompt, send the message once, return the raw
//! completion. Shared by the specialist fan-out and the coordinator stage.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use consult_domain::{Model, SpecialistProfile};
use tracing::{debug, warn};

/// Invoke `profile` with `message`, applying the timeout and retry policy
/// from `params`.
///
/// Blank completions are reported as [`GatewayError::EmptyCompletion`].
pub async fn invoke_persona<G: LlmGateway + ?Sized>(
    gateway: &G,
    model: &Model,
    profile: &SpecialistProfile,
    message: &str,
    params: &ExecutionParams,
) -> Result<String, GatewayError> {
    let mut attempt = 0;

    loop {
        match invoke_once(gateway, model, profile, message, params).await {
            Ok(text) => return Ok(text),
            Err(e) if e.is_retryable() && attempt < params.max_retries => {
                let delay = params.retry_delay(attempt);
                warn!(
                    persona = %profile,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    "Invocation failed, retrying: {}",
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn invoke_once<G: LlmGateway + ?Sized>(
    gateway: &G,
    model: &Model,
    profile: &SpecialistProfile,
    message: &str,
    params: &ExecutionParams,
) -> Result<String, GatewayError> {
    let request = async {
        debug!(persona = %profile, model = %model, "Sending request");
        let session = gateway
            .create_session(model, &profile.system_prompt, params.sampling())
            .await?;
        let text = session.send(message).await?;
        if text.trim().is_empty() {
            return Err(GatewayError::EmptyCompletion);
        }
        Ok(text)
    };

    match params.invocation_timeout {
        Some(limit) => tokio::time::timeout(limit, request)
            .await
            .map_err(|_| GatewayError::Timeout)?,
        None => request.await,
    }
}
