//! Completion parsing for consultations.
//!
//! These functions extract structured records from free-form model output.
//! They are pure text pattern matching with no I/O. Text generation is not guaranteed to follow the
//! requested format, so nothing here ever fails: every missing field falls
//! back to a documented default.
//!
//! # Functions
//!
//! | Function | Stage | Fields |
//! |----------|-------|--------|
//! | [`parse_specialist_response`] | Specialist | assessment, confidence, key findings, recommendations |
//! | [`parse_consensus_response`] | Coordinator | diagnosis, confidence, summary, urgency |
//!
//! # Section labels
//!
//! A line opens a section when it starts with a recognised label followed
//! by `:`, ` - `, or the end of the line. Markdown decoration is tolerated:
//! `## Assessment`, `**Key Findings:**`, `3. Recommendations`, and
//! `Urgency Level (low/medium/high/immediate): high` are all labels.
//!
//! Assessment, findings and recommendations labels may carry up to three
//! qualifying words (`Clinical Assessment:`, `Immediate Treatment
//! Recommendations:`). A qualified label needs a colon or line decoration,
//! so prose ending in "assessment" stays prose. Inside an open findings or
//! recommendations list, bulleted lines are always list items.

use super::entities::DiagnosisResult;
use super::value_objects::{ConsensusResult, Urgency};
use regex::Regex;
use std::sync::LazyLock;

/// Confidence used when a specialist reports none
pub const DEFAULT_CONFIDENCE: u8 = 75;

/// Maximum key findings kept per specialist
pub const MAX_KEY_FINDINGS: usize = 5;

/// Maximum recommendations kept per specialist
pub const MAX_RECOMMENDATIONS: usize = 4;

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?P<heading>#{1,6}\s*)?(?P<bullet>[-*•+]\s+)?(?P<numeral>\d+[.)]\s*)?(?P<emphasis>[*_]*)\s*(?P<label>(?:consensus\s+|final\s+|unified\s+)?diagnosis|assessment|(?:overall\s+)?confidence(?:\s+level)?|key\s+findings?|findings|recommendations?|(?:brief\s+)?summary|urgency(?:\s+level)?|(?P<qualifier>(?:[\w-]+\s+){1,3})(?:assessment|key\s+findings?|findings|recommendations?))[*_]*(?:\s*\([^)]*\))?[*_]*\s*(?P<sep>:|[-–]\s|$)[*_\s]*(?P<rest>.*)$",
    )
    .expect("valid section label regex")
});

static CONFIDENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bconfidence(?:\s+level)?[*_]*\s*(?:\([^)]*\))?[*_]*\s*[:\-–]?[*_\s]*(?P<value>\d+)\s*%?",
    )
    .expect("valid confidence regex")
});

static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•+]|\d+[.)])\s+(?P<item>.*)$").expect("valid list item regex")
});

static URGENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?P<level>low|medium|high|immediate)\b").expect("valid urgency regex")
});

/// Recognised section labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Assessment,
    Confidence,
    KeyFindings,
    Recommendations,
    Diagnosis,
    Summary,
    Urgency,
}

impl Label {
    fn classify(raw: &str) -> Self {
        let raw = raw.to_lowercase();
        if raw.contains("diagnosis") {
            Label::Diagnosis
        } else if raw.contains("assessment") {
            Label::Assessment
        } else if raw.contains("confidence") {
            Label::Confidence
        } else if raw.contains("finding") {
            Label::KeyFindings
        } else if raw.contains("recommendation") {
            Label::Recommendations
        } else if raw.contains("summary") {
            Label::Summary
        } else {
            Label::Urgency
        }
    }
}

/// Labels that delimit sections in a specialist completion
const SPECIALIST_LABELS: &[Label] = &[
    Label::Assessment,
    Label::Confidence,
    Label::KeyFindings,
    Label::Recommendations,
];

/// Labels that delimit sections in a coordinator completion
const COORDINATOR_LABELS: &[Label] = &[
    Label::Diagnosis,
    Label::Confidence,
    Label::Summary,
    Label::Urgency,
    Label::Assessment,
    Label::KeyFindings,
    Label::Recommendations,
];

/// One labelled block of a completion
#[derive(Debug)]
struct Section<'a> {
    label: Label,
    /// Text on the label line after the separator
    inline: &'a str,
    /// Lines up to the next recognised label
    body: Vec<&'a str>,
}

impl Section<'_> {
    /// Inline text and body joined, trimmed
    fn text(&self) -> String {
        std::iter::once(self.inline)
            .chain(self.body.iter().copied())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Inline text, or the first non-blank body line
    fn first_line(&self) -> Option<&str> {
        std::iter::once(self.inline)
            .chain(self.body.iter().copied())
            .map(str::trim)
            .find(|line| !line.is_empty())
    }

    /// List-item lines with their markers stripped, blanks dropped
    fn list_items(&self, limit: usize) -> Vec<String> {
        self.body
            .iter()
            .filter_map(|line| LIST_ITEM_RE.captures(line))
            .filter_map(|caps| caps.name("item"))
            .map(|item| strip_emphasis(item.as_str()))
            .filter(|item| !item.is_empty())
            .take(limit)
            .collect()
    }
}

/// Match `line` against the section labels, returning the label and the
/// text after its separator.
fn open_section<'a>(line: &'a str, labels: &[Label], in_list: bool) -> Option<(Label, &'a str)> {
    let caps = LABEL_RE.captures(line)?;
    if in_list && caps.name("bullet").is_some() {
        return None;
    }

    let raw = caps.name("label")?.as_str();
    let qualifier = caps.name("qualifier");
    if qualifier.is_some() {
        let decorated = caps.name("heading").is_some()
            || caps.name("numeral").is_some()
            || caps.name("emphasis").is_some_and(|m| !m.is_empty());
        let colon = caps.name("sep").is_some_and(|m| m.as_str() == ":");
        if !decorated && !colon {
            return None;
        }
    }

    let label = Label::classify(&raw[qualifier.map_or(0, |q| q.len())..]);
    let rest = caps.name("rest").map_or("", |m| m.as_str());
    labels.contains(&label).then_some((label, rest))
}

/// Split text into sections delimited by `labels`. Lines before the first
/// label are dropped.
fn split_sections<'a>(text: &'a str, labels: &[Label]) -> Vec<Section<'a>> {
    let mut sections: Vec<Section<'a>> = Vec::new();

    for line in text.lines() {
        let in_list = sections
            .last()
            .is_some_and(|s| matches!(s.label, Label::KeyFindings | Label::Recommendations));

        match open_section(line, labels, in_list) {
            Some((label, inline)) => sections.push(Section {
                label,
                inline,
                body: Vec::new(),
            }),
            None => {
                if let Some(current) = sections.last_mut() {
                    current.body.push(line);
                }
            }
        }
    }

    sections
}

fn find<'s, 'a>(sections: &'s [Section<'a>], label: Label) -> Option<&'s Section<'a>> {
    sections.iter().find(|s| s.label == label)
}

/// Remove surrounding markdown emphasis and whitespace
fn strip_emphasis(text: &str) -> String {
    text.trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
        .to_string()
}

/// First integer adjacent to a Confidence label, clamped to 0-100.
///
/// Values too large to represent clamp to 100.
fn extract_confidence(text: &str) -> Option<u8> {
    let caps = CONFIDENCE_RE.captures(text)?;
    let digits = caps.name("value")?.as_str();
    let value = digits.parse::<u64>().unwrap_or(u64::MAX).min(100);
    Some(value as u8)
}

/// First paragraph of the text (up to the first blank line), skipping
/// leading blank lines.
fn first_paragraph(text: &str) -> String {
    text.lines()
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Structured fields extracted from a specialist completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAssessment {
    pub assessment: String,
    pub confidence: u8,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Parse a specialist completion into its structured fields.
///
/// - **assessment**: the Assessment section; without one, the first paragraph
/// - **confidence**: first integer after a Confidence label, else
///   [`DEFAULT_CONFIDENCE`]; clamped to 0-100
/// - **key findings / recommendations**: list items under the respective
///   section, capped at [`MAX_KEY_FINDINGS`] / [`MAX_RECOMMENDATIONS`]
///
/// # Examples
///
/// ```
/// use consult_domain::consultation::parsing::parse_specialist_response;
///
/// let parsed = parse_specialist_response("Assessment: Benign.\nConfidence: 83%");
/// assert_eq!(parsed.assessment, "Benign.");
/// assert_eq!(parsed.confidence, 83);
///
/// let parsed = parse_specialist_response("Looks like a nevus.");
/// assert_eq!(parsed.confidence, 75); // fallback
/// ```
pub fn parse_specialist_response(content: &str) -> ParsedAssessment {
    let sections = split_sections(content, SPECIALIST_LABELS);

    let assessment = find(&sections, Label::Assessment)
        .map(Section::text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| first_paragraph(content));

    let confidence = extract_confidence(content).unwrap_or(DEFAULT_CONFIDENCE);

    let key_findings = find(&sections, Label::KeyFindings)
        .map(|s| s.list_items(MAX_KEY_FINDINGS))
        .unwrap_or_default();

    let recommendations = find(&sections, Label::Recommendations)
        .map(|s| s.list_items(MAX_RECOMMENDATIONS))
        .unwrap_or_default();

    ParsedAssessment {
        assessment,
        confidence,
        key_findings,
        recommendations,
    }
}

/// Parse a coordinator completion into a [`ConsensusResult`].
///
/// Fallbacks come from the original diagnosis:
///
/// - **diagnosis**: Consensus Diagnosis / Diagnosis line, else `original.diagnosis`
/// - **confidence**: as for specialists, else `original.confidence`
/// - **summary**: Summary section, else a sentence naming the diagnosis
/// - **urgency**: first of low/medium/high/immediate in the Urgency
///   section (case-insensitive), else [`Urgency::Medium`]
pub fn parse_consensus_response(content: &str, original: &DiagnosisResult) -> ConsensusResult {
    let sections = split_sections(content, COORDINATOR_LABELS);

    let diagnosis = find(&sections, Label::Diagnosis)
        .and_then(Section::first_line)
        .map(|line| {
            let line = LIST_ITEM_RE
                .captures(line)
                .and_then(|caps| caps.name("item"))
                .map_or(line, |m| m.as_str());
            strip_emphasis(line)
        })
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| original.diagnosis.clone());

    let confidence = extract_confidence(content).unwrap_or(original.confidence.min(100));

    let summary = find(&sections, Label::Summary)
        .map(Section::text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default_summary(&diagnosis));

    let urgency = find(&sections, Label::Urgency)
        .and_then(|s| {
            let text = s.text();
            URGENCY_RE
                .captures(&text)
                .and_then(|caps| caps.name("level")?.as_str().parse::<Urgency>().ok())
        })
        .unwrap_or_default();

    ConsensusResult {
        diagnosis,
        confidence,
        summary,
        urgency,
    }
}

/// Summary used when the coordinator provides none
pub fn default_summary(diagnosis: &str) -> String {
    format!(
        "Multiple specialists have reviewed the case and reached consensus on {}.",
        diagnosis
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn original() -> DiagnosisResult {
        DiagnosisResult::new("Melanocytic Nevus (Benign)", 72, "Monitor for changes.")
    }

    // ==================== parse_specialist_response Tests ====================

    #[test]
    fn test_structured_markdown_response() {
        let content = r#"**Assessment:** The lesion shows symmetric pigmentation
consistent with a benign nevus.

**Confidence:** 83%

**Key Findings:**
- Symmetric shape
- Uniform brown color
- Regular borders

**Recommendations:**
1. Routine monitoring
2. Annual skin check
"#;

        let parsed = parse_specialist_response(content);
        assert_eq!(
            parsed.assessment,
            "The lesion shows symmetric pigmentation\nconsistent with a benign nevus."
        );
        assert_eq!(parsed.confidence, 83);
        assert_eq!(
            parsed.key_findings,
            vec!["Symmetric shape", "Uniform brown color", "Regular borders"]
        );
        assert_eq!(
            parsed.recommendations,
            vec!["Routine monitoring", "Annual skin check"]
        );
    }

    #[test]
    fn test_heading_labels() {
        let content = "## 1. Assessment\nLikely basal cell carcinoma.\n\n## 2. Confidence\n68\n\n## 3. Key Findings\n* Pearly papule\n* Telangiectasia\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.assessment, "Likely basal cell carcinoma.");
        assert_eq!(parsed.confidence, 68);
        assert_eq!(parsed.key_findings, vec!["Pearly papule", "Telangiectasia"]);
        assert!(parsed.recommendations.is_empty());
    }

    #[test]
    fn test_confidence_percent() {
        let parsed = parse_specialist_response("Assessment: Benign.\nConfidence: 83%\n");
        assert_eq!(parsed.confidence, 83);
    }

    #[test]
    fn test_confidence_default_when_missing() {
        let parsed = parse_specialist_response("Assessment: Benign keratosis.\n");
        assert_eq!(parsed.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(parsed.confidence, 75);
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(parse_specialist_response("Confidence: 150%").confidence, 100);
        assert_eq!(
            parse_specialist_response("Confidence: 99999999999999999999999").confidence,
            100
        );
        assert_eq!(parse_specialist_response("Confidence: 0%").confidence, 0);
    }

    #[test]
    fn test_confidence_skips_parenthetical_range() {
        let parsed = parse_specialist_response("Confidence Level (0-100): 64");
        assert_eq!(parsed.confidence, 64);
    }

    #[test]
    fn test_findings_truncated_to_five_and_blank_lines_dropped() {
        let content = "Key Findings:\n- one\n\n- two\n-   \n- three\n- four\n\n- five\n- six\n- seven\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.key_findings, vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn test_recommendations_truncated_to_four() {
        let content = "Recommendations:\n1. a\n2. b\n3. c\n4. d\n5. e\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.recommendations, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_multi_digit_numerals_are_stripped() {
        let content = "Key Findings:\n10. tenth item\n11) eleventh item\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.key_findings, vec!["tenth item", "eleventh item"]);
    }

    #[test]
    fn test_non_list_lines_in_section_are_ignored() {
        let content = "Key Findings:\nThe following stand out:\n- Asymmetry\nSee above.\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.key_findings, vec!["Asymmetry"]);
    }

    #[test]
    fn test_assessment_falls_back_to_first_paragraph() {
        let content = "\n\nThis appears to be a dermatofibroma.\nFirm on palpation.\n\nSecond paragraph.";
        let parsed = parse_specialist_response(content);
        assert_eq!(
            parsed.assessment,
            "This appears to be a dermatofibroma.\nFirm on palpation."
        );
    }

    #[test]
    fn test_assessment_stops_at_next_label() {
        let content = "assessment - Vascular lesion.\nLikely cherry angioma.\nCONFIDENCE: 90\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.assessment, "Vascular lesion.\nLikely cherry angioma.");
        assert_eq!(parsed.confidence, 90);
    }

    #[test]
    fn test_word_starting_with_label_is_not_a_label() {
        let content = "Assessment-based triage is ongoing.\n\nMore text.";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.assessment, "Assessment-based triage is ongoing.");
    }

    #[test]
    fn test_qualified_recommendations_label() {
        let content = "Assessment: Suspicious pigmented lesion.\nConfidence: 80%\n\nImmediate Treatment Recommendations:\n- Excision biopsy\n- Follow-up in two weeks\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.assessment, "Suspicious pigmented lesion.");
        assert_eq!(
            parsed.recommendations,
            vec!["Excision biopsy", "Follow-up in two weeks"]
        );
    }

    #[test]
    fn test_qualified_assessment_label_with_emphasis() {
        let content = "**Clinical Assessment:** Likely a benign nevus. Symmetric.\n**Confidence:** 85%\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.assessment, "Likely a benign nevus. Symmetric.");
        assert_eq!(parsed.confidence, 85);
    }

    #[test]
    fn test_qualified_heading_label() {
        let content = "## Treatment Recommendations\n- Topical imiquimod\n- Sun protection\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.recommendations, vec!["Topical imiquimod", "Sun protection"]);
    }

    #[test]
    fn test_prose_ending_in_label_word_is_not_a_label() {
        let content = "We defer final assessment\nuntil biopsy.\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(parsed.assessment, "We defer final assessment\nuntil biopsy.");
    }

    #[test]
    fn test_bulleted_label_word_inside_list_is_an_item() {
        let content = "Key Findings:\n- Asymmetry\n- Confidence: limited by image quality\n- Blue-white veil\n- Irregular border\n";
        let parsed = parse_specialist_response(content);
        assert_eq!(
            parsed.key_findings,
            vec![
                "Asymmetry",
                "Confidence: limited by image quality",
                "Blue-white veil",
                "Irregular border"
            ]
        );
        assert_eq!(parsed.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_empty_input_never_fails() {
        let parsed = parse_specialist_response("");
        assert_eq!(parsed.assessment, "");
        assert_eq!(parsed.confidence, 75);
        assert!(parsed.key_findings.is_empty());
        assert!(parsed.recommendations.is_empty());
    }

    // ==================== parse_consensus_response Tests ====================

    #[test]
    fn test_consensus_full_response() {
        let content = r#"**Consensus Diagnosis:** Atypical (dysplastic) nevus

**Overall Confidence Level:** 78%

**Summary:** The panel agrees the lesion is most likely benign
but atypical features warrant excision.

**Urgency Level:** HIGH - schedule within two weeks
"#;
        let consensus = parse_consensus_response(content, &original());
        assert_eq!(consensus.diagnosis, "Atypical (dysplastic) nevus");
        assert_eq!(consensus.confidence, 78);
        assert_eq!(
            consensus.summary,
            "The panel agrees the lesion is most likely benign\nbut atypical features warrant excision."
        );
        assert_eq!(consensus.urgency, Urgency::High);
    }

    #[test]
    fn test_consensus_diagnosis_on_following_line() {
        let content = "## 1. Consensus Diagnosis\n\n- Basal Cell Carcinoma\n\n## 4. Urgency\nimmediate\n";
        let consensus = parse_consensus_response(content, &original());
        assert_eq!(consensus.diagnosis, "Basal Cell Carcinoma");
        assert_eq!(consensus.urgency, Urgency::Immediate);
    }

    #[test]
    fn test_consensus_fallbacks() {
        let consensus = parse_consensus_response("The specialists broadly agree.", &original());
        assert_eq!(consensus.diagnosis, "Melanocytic Nevus (Benign)");
        assert_eq!(consensus.confidence, 72);
        assert_eq!(
            consensus.summary,
            "Multiple specialists have reviewed the case and reached consensus on Melanocytic Nevus (Benign)."
        );
        assert_eq!(consensus.urgency, Urgency::Medium);
    }

    #[test]
    fn test_bulleted_labels_outside_lists() {
        let content = "- Consensus Diagnosis: Seborrheic keratosis\n- Urgency: high\n";
        let consensus = parse_consensus_response(content, &original());
        assert_eq!(consensus.diagnosis, "Seborrheic keratosis");
        assert_eq!(consensus.urgency, Urgency::High);
    }

    #[test]
    fn test_urgency_defaults_to_medium_without_keyword() {
        let content = "Diagnosis: Benign keratosis\nUrgency: routine follow-up\n";
        let consensus = parse_consensus_response(content, &original());
        assert_eq!(consensus.urgency, Urgency::Medium);
    }

    #[test]
    fn test_urgency_outside_label_is_ignored() {
        let content = "Diagnosis: Benign keratosis\nRisk is low overall.\n";
        let consensus = parse_consensus_response(content, &original());
        assert_eq!(consensus.urgency, Urgency::Medium);
    }

    #[test]
    fn test_urgency_with_enumerated_hint() {
        let content = "Urgency level (low/medium/high/immediate): Low\n";
        let consensus = parse_consensus_response(content, &original());
        assert_eq!(consensus.urgency, Urgency::Low);
    }

    #[test]
    fn test_summary_default_names_parsed_diagnosis() {
        let content = "Diagnosis: Dermatofibroma\nConfidence: 91\n";
        let consensus = parse_consensus_response(content, &original());
        assert_eq!(consensus.diagnosis, "Dermatofibroma");
        assert_eq!(consensus.confidence, 91);
        assert!(consensus.summary.ends_with("consensus on Dermatofibroma."));
    }

    #[test]
    fn test_summary_stops_at_recommendations() {
        let content = "Summary: Benign lesion.\nRecommendations:\n- Monitor\nUrgency: low\n";
        let consensus = parse_consensus_response(content, &original());
        assert_eq!(consensus.summary, "Benign lesion.");
        assert_eq!(consensus.urgency, Urgency::Low);
    }
}
