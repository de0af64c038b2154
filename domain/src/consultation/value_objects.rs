//! Consultation value objects - immutable result types.
//!
//! These types represent the outputs of each consultation stage:
//! - [`AgentResponse`] - One specialist's structured opinion
//! - [`ConsensusResult`] - The coordinator's synthesis
//! - [`ConsultationResponse`] - Complete result returned across the boundary

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Stage of a consultation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStage {
    /// Concurrent fan-out to every specialist
    #[serde(rename = "specialist")]
    Specialists,
    /// Single coordinator synthesis over all specialist outputs
    Coordinator,
}

impl ConsultationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationStage::Specialists => "specialist",
            ConsultationStage::Coordinator => "coordinator",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConsultationStage::Specialists => "Specialist Review",
            ConsultationStage::Coordinator => "Coordinator Synthesis",
        }
    }
}

impl std::fmt::Display for ConsultationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency level assigned by the coordinator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Immediate,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Immediate => "immediate",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Urgency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            "immediate" => Ok(Urgency::Immediate),
            other => Err(DomainError::InvalidUrgency(other.to_string())),
        }
    }
}

/// Structured opinion from a single specialist.
///
/// One per specialist per consultation; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub role: String,
    pub name: String,
    pub assessment: String,
    /// Clamped to 0-100
    pub confidence: u8,
    /// At most 5 entries
    pub key_findings: Vec<String>,
    /// At most 4 entries
    pub recommendations: Vec<String>,
}

/// Consensus produced by the coordinator stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub diagnosis: String,
    /// Clamped to 0-100
    pub confidence: u8,
    pub summary: String,
    pub urgency: Urgency,
}

/// Complete result of a consultation.
///
/// `specialists` always has exactly one entry per configured profile, in
/// configuration order. A partial list is not representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationResponse {
    pub consensus: ConsensusResult,
    pub specialists: Vec<AgentResponse>,
    /// 0-100, see [`agreement_score`](super::agreement::agreement_score)
    pub agreement_score: u8,
    /// Wall-clock milliseconds from dispatch start to final assembly
    pub processing_time: u64,
}

impl ConsultationResponse {
    /// Specialist confidences in configuration order.
    pub fn confidences(&self) -> Vec<u8> {
        self.specialists.iter().map(|s| s.confidence).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_parse_case_insensitive() {
        assert_eq!("IMMEDIATE".parse::<Urgency>().unwrap(), Urgency::Immediate);
        assert_eq!(" High ".parse::<Urgency>().unwrap(), Urgency::High);
        assert!("urgent".parse::<Urgency>().is_err());
    }

    #[test]
    fn test_urgency_default_is_medium() {
        assert_eq!(Urgency::default(), Urgency::Medium);
    }

    #[test]
    fn test_response_serializes_boundary_shape() {
        let response = ConsultationResponse {
            consensus: ConsensusResult {
                diagnosis: "Melanoma".to_string(),
                confidence: 82,
                summary: "Biopsy advised.".to_string(),
                urgency: Urgency::High,
            },
            specialists: vec![AgentResponse {
                role: "Dermatologist".to_string(),
                name: "Dr. Sarah Chen".to_string(),
                assessment: "Asymmetric lesion.".to_string(),
                confidence: 80,
                key_findings: vec!["Irregular border".to_string()],
                recommendations: vec!["Excisional biopsy".to_string()],
            }],
            agreement_score: 100,
            processing_time: 1234,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["consensus"]["urgency"], "high");
        assert_eq!(value["agreementScore"], 100);
        assert_eq!(value["processingTime"], 1234);
        assert_eq!(value["specialists"][0]["keyFindings"][0], "Irregular border");
        assert_eq!(response.confidences(), vec![80]);
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(ConsultationStage::Specialists.to_string(), "specialist");
        assert_eq!(ConsultationStage::Coordinator.as_str(), "coordinator");
    }
}
