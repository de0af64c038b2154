//! Domain layer for derma-consult
//!
//! This crate contains the core consultation entities, value objects,
//! prompt templates, completion parsing and agreement scoring.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Specialist**: an independently prompted persona producing one
//!   [`AgentResponse`] per consultation
//! - **Coordinator**: the second-stage persona merging every specialist
//!   response into one [`ConsensusResult`]
//! - **Agreement score**: 0-100, inversely proportional to the dispersion of
//!   specialist confidences

pub mod config;
pub mod consultation;
pub mod core;
pub mod prompt;

// Re-export commonly used types
pub use consultation::{
    AgentResponse, ConsensusResult, ConsultationRequest, ConsultationResponse, ConsultationStage,
    DiagnosisResult, ParsedAssessment, PatientContext, SimilarCase, SpecialistProfile, Urgency,
    agreement_score, parse_consensus_response, parse_specialist_response,
};
pub use config::OutputFormat;
pub use core::{error::DomainError, model::Model};
pub use prompt::ConsultationPrompt;
