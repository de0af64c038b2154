//! Anthropic Messages API wire types
//!
//! Only the subset needed for single-turn text completion is modelled.

use consult_application::ports::llm_gateway::GatewayError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Longest raw body excerpt carried in an error message
const MAX_ERROR_BODY: usize = 300;

/// `POST /v1/messages` request body
#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub system: &'a str,
    pub messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> Message<'a> {
    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

/// Successful response body
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    /// Text of the first text block, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
}

/// Human-readable message from an error body.
///
/// Uses the API's `{"error": {"type", "message"}}` envelope when present,
/// otherwise a truncated excerpt of the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            format!("{}: {}", parsed.error.kind, parsed.error.message)
        }
        _ => body.trim().chars().take(MAX_ERROR_BODY).collect(),
    }
}

/// Map a non-success HTTP status to a gateway error
pub fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let message = format!("HTTP {}: {}", status.as_u16(), error_message(body));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited(message),
        s if s.is_server_error() => GatewayError::Unavailable(message),
        _ => GatewayError::RequestFailed(message),
    }
}
