//! Presentation layer for derma-consult
//!
//! This crate contains CLI definitions, output formatters,
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::channel::{ChannelProgress, ConsultationEvent};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
