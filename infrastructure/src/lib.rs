//! Infrastructure layer for derma-consult
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod anthropic;
pub mod config;

// Re-export commonly used types
pub use anthropic::{AnthropicLlmGateway, AnthropicSession};
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileAnthropicConfig, FileConfig,
    FileConsultationConfig, FileOutputConfig, FileSpecialistConfig,
};
