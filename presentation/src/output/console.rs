//! Console output formatter for consultation responses

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use consult_domain::{AgentResponse, ConsultationResponse, Urgency};

/// Formats consultation responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete response
    pub fn format(response: &ConsultationResponse) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Specialist Consultation"));
        output.push('\n');

        // Consensus
        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&Self::consensus_block(response));

        output.push_str(&format!(
            "\n{} {}\n",
            "Agreement:".cyan().bold(),
            Self::agreement(response.agreement_score)
        ));
        output.push_str(&format!(
            "{} {} ms\n",
            "Processing time:".cyan().bold(),
            response.processing_time
        ));

        // Specialists
        output.push_str(&Self::section_header(&format!(
            "Specialist Opinions ({})",
            response.specialists.len()
        )));
        for specialist in &response.specialists {
            output.push_str(&Self::specialist_block(specialist));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(response: &ConsultationResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the consensus only (concise output)
    pub fn format_summary(response: &ConsultationResponse) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Consultation Consensus ===".cyan().bold()
        ));
        output.push_str(&Self::consensus_block(response));
        output.push_str(&format!(
            "\n{} {} across {} specialists\n",
            "Agreement:".dimmed(),
            Self::agreement(response.agreement_score),
            response.specialists.len()
        ));

        output
    }

    fn consensus_block(response: &ConsultationResponse) -> String {
        let consensus = &response.consensus;
        format!(
            "{} {}\n{} {}%\n{} {}\n\n{}\n",
            "Diagnosis:".bold(),
            consensus.diagnosis,
            "Confidence:".bold(),
            consensus.confidence,
            "Urgency:".bold(),
            Self::urgency(consensus.urgency),
            consensus.summary
        )
    }

    fn specialist_block(specialist: &AgentResponse) -> String {
        let mut block = format!(
            "\n{} {}\n{}\n",
            format!("── {} ({}) ──", specialist.name, specialist.role)
                .yellow()
                .bold(),
            format!("{}%", specialist.confidence).dimmed(),
            specialist.assessment
        );

        if !specialist.key_findings.is_empty() {
            block.push_str(&format!("\n{}\n", "Key Findings:".cyan()));
            for finding in &specialist.key_findings {
                block.push_str(&format!("  * {}\n", finding));
            }
        }

        if !specialist.recommendations.is_empty() {
            block.push_str(&format!("\n{}\n", "Recommendations:".green()));
            for recommendation in &specialist.recommendations {
                block.push_str(&format!("  * {}\n", recommendation));
            }
        }

        block
    }

    fn urgency(urgency: Urgency) -> ColoredString {
        let label = urgency.as_str().to_uppercase();
        match urgency {
            Urgency::Low => label.green(),
            Urgency::Medium => label.yellow(),
            Urgency::High => label.red(),
            Urgency::Immediate => label.red().bold(),
        }
    }

    fn agreement(score: u8) -> ColoredString {
        let label = format!("{}/100", score);
        match score {
            80..=100 => label.green(),
            50..=79 => label.yellow(),
            _ => label.red(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, response: &ConsultationResponse) -> String {
        Self::format(response)
    }

    fn format_json(&self, response: &ConsultationResponse) -> String {
        Self::format_json(response)
    }

    fn format_summary(&self, response: &ConsultationResponse) -> String {
        Self::format_summary(response)
    }
}
