//! Prompt domain
//!
//! Persona system prompts and the user-message templates for each stage of
//! a consultation.

pub mod personas;
mod template;

pub use template::ConsultationPrompt;
