//! Consultation input entities.
//!
//! - [`DiagnosisResult`]: candidate diagnosis from the upstream similarity search
//! - [`SimilarCase`]: one ranked historical case backing that diagnosis
//! - [`PatientContext`]: optional clinical details supplied by the caller
//! - [`SpecialistProfile`]: a persona taking part in the consultation
//! - [`ConsultationRequest`]: the boundary request wrapping the above

use crate::core::error::DomainError;
use crate::prompt::personas;
use serde::{Deserialize, Serialize};

/// Candidate diagnosis produced by the visual similarity search.
///
/// Consumed as an opaque, already-validated input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    /// Human-readable diagnosis label (e.g. "Melanocytic Nevus (Benign)")
    pub diagnosis: String,
    /// Confidence of the top match, 0-100
    pub confidence: u8,
    /// Recommendation text attached to the diagnosis
    #[serde(default)]
    pub recommendation: String,
    /// Ranked similar cases, best match first
    #[serde(default)]
    pub similar_cases: Vec<SimilarCase>,
}

impl DiagnosisResult {
    pub fn new(
        diagnosis: impl Into<String>,
        confidence: u8,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            confidence: confidence.min(100),
            recommendation: recommendation.into(),
            similar_cases: Vec::new(),
        }
    }

    pub fn with_similar_case(mut self, case: SimilarCase) -> Self {
        self.similar_cases.push(case);
        self
    }
}

/// A historical case returned by the nearest-neighbour lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarCase {
    #[serde(alias = "imageId")]
    pub id: String,
    /// Diagnosis code of the case (e.g. "nv", "mel")
    #[serde(default)]
    pub diagnosis: String,
    /// Similarity to the query image, 0-100
    pub similarity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localization: Option<String>,
}

impl SimilarCase {
    pub fn new(id: impl Into<String>, diagnosis: impl Into<String>, similarity: u8) -> Self {
        Self {
            id: id.into(),
            diagnosis: diagnosis.into(),
            similarity: similarity.min(100),
            age: None,
            sex: None,
            localization: None,
        }
    }

    pub fn with_demographics(
        mut self,
        age: f64,
        sex: impl Into<String>,
        localization: impl Into<String>,
    ) -> Self {
        self.age = Some(age);
        self.sex = Some(sex.into());
        self.localization = Some(localization.into());
        self
    }
}

/// Free-form clinical context supplied alongside the image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

/// A persona taking part in a consultation.
///
/// The roster is configured once at process start and never reordered:
/// specialist output is always reported in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistProfile {
    /// Role label (e.g. "Dermatologist")
    pub role: String,
    /// Persona display name (e.g. "Dr. Sarah Chen")
    pub name: String,
    /// Fixed system prompt for this persona
    pub system_prompt: String,
}

impl SpecialistProfile {
    pub fn new(
        role: impl Into<String>,
        name: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
            system_prompt: system_prompt.into(),
        }
    }

    /// The five-specialist dermatology roster, in reporting order.
    pub fn default_roster() -> Vec<SpecialistProfile> {
        vec![
            Self::new(
                "Diagnostic AI",
                "AI Diagnostic System",
                personas::DIAGNOSTIC,
            ),
            Self::new("Dermatologist", "Dr. Sarah Chen", personas::DERMATOLOGIST),
            Self::new("Pathologist", "Dr. James Wilson", personas::PATHOLOGIST),
            Self::new(
                "Treatment Specialist",
                "Dr. Maria Rodriguez",
                personas::TREATMENT,
            ),
            Self::new("Risk Assessment", "Dr. David Kim", personas::RISK),
        ]
    }

    /// The coordinator persona that synthesizes specialist opinions.
    pub fn coordinator() -> SpecialistProfile {
        Self::new(
            "Medical Coordinator",
            "Dr. Emily Thompson",
            personas::COORDINATOR,
        )
    }

    /// Reject profiles with blank fields.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("role", &self.role),
            ("name", &self.name),
            ("system_prompt", &self.system_prompt),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidProfile(format!(
                    "'{}' has an empty {}",
                    self.display_label(),
                    field
                )));
            }
        }
        Ok(())
    }

    /// "Name (Role)" label used in prompts and logs.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }
}

impl std::fmt::Display for SpecialistProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

/// Boundary request: `{ diagnosisResult, patientContext? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    pub diagnosis_result: DiagnosisResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_context: Option<PatientContext>,
}
