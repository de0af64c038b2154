//! Configuration errors

use thiserror::Error;

/// Fatal configuration problems, reported at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No API key found: set {env} or providers.anthropic.api_key")]
    MissingApiKey { env: String },

    #[error("Failed to load configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
}
