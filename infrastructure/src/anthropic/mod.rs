//! Anthropic Messages API adapter
//!
//! Implements the [`LlmGateway`](consult_application::LlmGateway) port over
//! HTTPS with `reqwest`.

mod gateway;
mod protocol;
mod session;

pub use gateway::AnthropicLlmGateway;
pub use session::AnthropicSession;
