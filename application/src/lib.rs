//! Application layer for derma-consult
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway, LlmSession, SamplingParams},
    progress::{ConsultationProgressNotifier, NoProgress},
};
pub use use_cases::run_consultation::{
    ConsultationError, RunConsultationInput, RunConsultationUseCase,
};
