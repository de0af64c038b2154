//! Prompt templates for the consultation flow

use crate::consultation::entities::{DiagnosisResult, PatientContext};
use crate::consultation::value_objects::AgentResponse;

const NOT_PROVIDED: &str = "Not provided";

/// Templates for generating the user message at each stage
pub struct ConsultationPrompt;

impl ConsultationPrompt {
    /// Shared case description sent to every specialist
    pub fn case_description(
        diagnosis: &DiagnosisResult,
        patient: Option<&PatientContext>,
    ) -> String {
        let mut prompt = format!(
            r#"DIAGNOSIS INFORMATION:
- Condition: {}
- Confidence: {}%
- Recommendation: {}

SIMILAR CASES ANALYZED:
"#,
            diagnosis.diagnosis, diagnosis.confidence, diagnosis.recommendation
        );

        if diagnosis.similar_cases.is_empty() {
            prompt.push_str("None available\n");
        }

        for (i, case) in diagnosis.similar_cases.iter().enumerate() {
            let age = case
                .age
                .map(|a| a.to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            prompt.push_str(&format!(
                "\n{}. {} ({}% similar)\n   - Age: {}, Sex: {}\n   - Location: {}\n",
                i + 1,
                case.diagnosis,
                case.similarity,
                age,
                case.sex.as_deref().unwrap_or("Unknown"),
                case.localization.as_deref().unwrap_or("Not specified"),
            ));
        }

        if let Some(patient) = patient {
            let age = patient
                .age
                .map(|a| a.to_string())
                .unwrap_or_else(|| NOT_PROVIDED.to_string());
            prompt.push_str(&format!(
                r#"
PATIENT CONTEXT:
- Age: {}
- Sex: {}
- Symptoms: {}
- Duration: {}
- Medical History: {}
"#,
                age,
                field(&patient.sex),
                field(&patient.symptoms),
                field(&patient.duration),
                field(&patient.medical_history),
            ));
        }

        prompt.push_str(
            r#"
Provide your expert assessment in a structured format with:
1. Assessment (2-3 sentences)
2. Confidence (percentage)
3. Key Findings (3-5 bullet points)
4. Recommendations (2-4 bullet points)
"#,
        );

        prompt
    }

    /// Synthesis request sent to the coordinator
    pub fn synthesis_prompt(specialists: &[AgentResponse], diagnosis: &DiagnosisResult) -> String {
        let mut prompt = format!(
            "ORIGINAL DIAGNOSIS: {}\n\nSPECIALIST OPINIONS:\n",
            diagnosis.diagnosis
        );

        for s in specialists {
            prompt.push_str(&format!(
                r#"
{} ({}):
- Assessment: {}
- Confidence: {}%
- Key Findings: {}
- Recommendations: {}
"#,
                s.name,
                s.role,
                s.assessment,
                s.confidence,
                s.key_findings.join("; "),
                s.recommendations.join("; "),
            ));
        }

        prompt.push_str(
            r#"
Based on all specialist inputs, provide:
1. Consensus diagnosis
2. Overall confidence level (0-100)
3. Brief summary (2-3 sentences)
4. Urgency level (low/medium/high/immediate)

Format your response clearly with these sections."#,
        );

        prompt
    }
}

/// Blank or absent patient fields render as "Not provided"
fn field(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_PROVIDED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consultation::entities::SimilarCase;

    fn diagnosis() -> DiagnosisResult {
        DiagnosisResult::new("Melanoma", 87, "IMMEDIATE dermatologist consultation required.")
            .with_similar_case(
                SimilarCase::new("ISIC_0001", "mel", 87).with_demographics(55.0, "male", "back"),
            )
            .with_similar_case(SimilarCase::new("ISIC_0002", "nv", 81))
    }

    #[test]
    fn test_case_description_enumerates_similar_cases() {
        let prompt = ConsultationPrompt::case_description(&diagnosis(), None);
        assert!(prompt.contains("- Condition: Melanoma"));
        assert!(prompt.contains("- Confidence: 87%"));
        assert!(prompt.contains("1. mel (87% similar)"));
        assert!(prompt.contains("- Age: 55, Sex: male"));
        assert!(prompt.contains("2. nv (81% similar)"));
        assert!(prompt.contains("- Age: Unknown, Sex: Unknown"));
        assert!(prompt.contains("- Location: Not specified"));
        assert!(!prompt.contains("PATIENT CONTEXT"));
        assert!(prompt.contains("Key Findings (3-5 bullet points)"));
    }

    #[test]
    fn test_case_description_without_similar_cases() {
        let diagnosis = DiagnosisResult::new("Dermatofibroma", 60, "Benign.");
        let prompt = ConsultationPrompt::case_description(&diagnosis, None);
        assert!(prompt.contains("SIMILAR CASES ANALYZED:\nNone available"));
    }

    #[test]
    fn test_patient_fields_render_not_provided() {
        let patient = PatientContext {
            age: Some(42),
            symptoms: Some("Itching".to_string()),
            duration: Some("   ".to_string()),
            ..Default::default()
        };
        let prompt = ConsultationPrompt::case_description(&diagnosis(), Some(&patient));
        assert!(prompt.contains("PATIENT CONTEXT:"));
        assert!(prompt.contains("- Age: 42"));
        assert!(prompt.contains("- Sex: Not provided"));
        assert!(prompt.contains("- Symptoms: Itching"));
        assert!(prompt.contains("- Duration: Not provided"));
        assert!(prompt.contains("- Medical History: Not provided"));
    }

    #[test]
    fn test_synthesis_prompt_lists_every_specialist() {
        let specialists = vec![
            AgentResponse {
                role: "Dermatologist".to_string(),
                name: "Dr. Sarah Chen".to_string(),
                assessment: "Irregular pigment network.".to_string(),
                confidence: 80,
                key_findings: vec!["Asymmetry".to_string(), "Blue-white veil".to_string()],
                recommendations: vec!["Excision".to_string()],
            },
            AgentResponse {
                role: "Pathologist".to_string(),
                name: "Dr. James Wilson".to_string(),
                assessment: "Expect atypical melanocytes.".to_string(),
                confidence: 70,
                key_findings: vec![],
                recommendations: vec!["Biopsy".to_string()],
            },
        ];

        let prompt = ConsultationPrompt::synthesis_prompt(&specialists, &diagnosis());
        assert!(prompt.starts_with("ORIGINAL DIAGNOSIS: Melanoma"));
        assert!(prompt.contains("Dr. Sarah Chen (Dermatologist):"));
        assert!(prompt.contains("- Key Findings: Asymmetry; Blue-white veil"));
        assert!(prompt.contains("Dr. James Wilson (Pathologist):"));
        assert!(prompt.contains("- Confidence: 70%"));
        assert!(prompt.contains("Urgency level (low/medium/high/immediate)"));

        let chen = prompt.find("Dr. Sarah Chen").unwrap();
        let wilson = prompt.find("Dr. James Wilson").unwrap();
        assert!(chen < wilson);
    }
}
