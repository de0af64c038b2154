//! Consultation domain
//!
//! A consultation asks several independent specialist personas to evaluate
//! one candidate diagnosis, then asks a coordinator persona to merge their
//! opinions into a single consensus.
//!
//! # Flow
//!
//! ```text
//! DiagnosisResult + PatientContext?
//!        │
//!        ▼  ConsultationPrompt::case_description
//! ┌──────────────┬──────────────┬─────┬──────────────┐
//! │ Specialist 1 │ Specialist 2 │ ... │ Specialist N │   (concurrent)
//! └──────┬───────┴──────┬───────┴─────┴──────┬───────┘
//!        ▼ parse_specialist_response (per completion)
//! Vec<AgentResponse>  (configuration order)
//!        │
//!        ▼  ConsultationPrompt::synthesis_prompt
//!   Coordinator ──► parse_consensus_response ──► ConsensusResult
//!        │
//!        ▼  agreement_score(specialist confidences)
//! ConsultationResponse
//! ```

pub mod agreement;
pub mod entities;
pub mod parsing;
pub mod value_objects;

pub use agreement::agreement_score;
pub use entities::{
    ConsultationRequest, DiagnosisResult, PatientContext, SimilarCase, SpecialistProfile,
};
pub use parsing::{ParsedAssessment, parse_consensus_response, parse_specialist_response};
pub use value_objects::{
    AgentResponse, ConsensusResult, ConsultationResponse, ConsultationStage, Urgency,
};
