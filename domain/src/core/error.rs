//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid urgency level: {0} (expected low, medium, high or immediate)")]
    InvalidUrgency(String),

    #[error("Invalid specialist profile: {0}")]
    InvalidProfile(String),
}
