//! Output formatter trait

use consult_domain::{ConsultationResponse, OutputFormat};

/// Trait for formatting consultation responses
pub trait OutputFormatter {
    /// Format the complete response
    fn format(&self, response: &ConsultationResponse) -> String;

    /// Format as JSON
    fn format_json(&self, response: &ConsultationResponse) -> String;

    /// Format the consensus only (concise output)
    fn format_summary(&self, response: &ConsultationResponse) -> String;

    /// Dispatch on `format`
    fn render(&self, response: &ConsultationResponse, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(response),
            OutputFormat::Summary => self.format_summary(response),
            OutputFormat::Json => self.format_json(response),
        }
    }
}
