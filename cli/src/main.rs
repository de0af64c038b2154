//! CLI entrypoint for derma-consult
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use consult_application::{RunConsultationInput, RunConsultationUseCase};
use consult_domain::{ConsultationRequest, Model};
use consult_infrastructure::{AnthropicLlmGateway, ConfigLoader, FileConfig};
use consult_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // stderr keeps stdout clean for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting derma-consult");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let format = config.output.resolve_format(cli.output.map(Into::into));

    // === Request ===
    let request = read_request(cli.request_path().map(|p| p.as_path())).await?;
    let input = build_input(&cli, &config, request);

    info!(
        "Consulting {} specialists ({}, coordinator {})",
        input.specialists.len(),
        input.specialist_model,
        input.coordinator_model
    );

    // === Dependency Injection ===
    let gateway = Arc::new(AnthropicLlmGateway::from_config(
        &config.providers.anthropic,
    )?);

    let mut params = config.consultation.execution_params();
    if let Some(secs) = cli.timeout {
        params = params.with_invocation_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = cli.retries {
        params = params.with_max_retries(retries);
    }

    let cancellation = CancellationToken::new();
    let ctrl_c = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling consultation");
            ctrl_c.cancel();
        }
    });

    let use_case = RunConsultationUseCase::new(gateway)
        .with_params(params)
        .with_cancellation(cancellation);

    // Execute with or without progress reporting
    let response = if cli.quiet || !config.output.progress {
        use_case.execute(input).await?
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    } else {
        use_case.execute_with_progress(input, &SimpleProgress).await?
    };

    // Output results
    println!("{}", ConsoleFormatter.render(&response, format));

    Ok(())
}

/// Read and decode the boundary request from `path`, or stdin
async fn read_request(path: Option<&Path>) -> Result<ConsultationRequest> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("Invalid consultation request JSON")
}

/// Merge request, configuration and CLI overrides into use-case input
fn build_input(cli: &Cli, config: &FileConfig, request: ConsultationRequest) -> RunConsultationInput {
    let specialist_model = match &cli.model {
        Some(name) => {
            let Ok(model) = name.parse::<Model>();
            model
        }
        None => config.consultation.model.clone(),
    };

    let coordinator_model = match (&cli.coordinator_model, &cli.model) {
        (Some(name), _) => {
            let Ok(model) = name.parse::<Model>();
            model
        }
        (None, Some(_)) if config.consultation.coordinator_model.is_none() => {
            specialist_model.clone()
        }
        _ => config.consultation.coordinator_model(),
    };

    RunConsultationInput::from_request(request)
        .with_specialists(config.roster())
        .with_models(specialist_model, coordinator_model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use consult_domain::DiagnosisResult;

    fn request() -> ConsultationRequest {
        ConsultationRequest {
            diagnosis_result: DiagnosisResult::new("Dermatofibroma", 66, "Benign."),
            patient_context: None,
        }
    }

    #[test]
    fn test_build_input_uses_config_by_default() {
        let cli = Cli::parse_from(["derma-consult"]);
        let mut config = FileConfig::default();
        config.consultation.coordinator_model = Some(Model::ClaudeOpus45);

        let input = build_input(&cli, &config, request());
        assert_eq!(input.specialist_model, Model::ClaudeSonnet4);
        assert_eq!(input.coordinator_model, Model::ClaudeOpus45);
        assert_eq!(input.specialists.len(), 5);
    }

    #[test]
    fn test_cli_model_applies_to_coordinator_when_unset() {
        let cli = Cli::parse_from(["derma-consult", "--model", "claude-haiku-4.5"]);
        let input = build_input(&cli, &FileConfig::default(), request());
        assert_eq!(input.specialist_model, Model::ClaudeHaiku45);
        assert_eq!(input.coordinator_model, Model::ClaudeHaiku45);

        let cli = Cli::parse_from([
            "derma-consult",
            "--model",
            "claude-haiku-4.5",
            "--coordinator-model",
            "claude-opus-4.5",
        ]);
        let input = build_input(&cli, &FileConfig::default(), request());
        assert_eq!(input.coordinator_model, Model::ClaudeOpus45);
    }

    #[test]
    fn test_request_json_decodes() {
        let raw = r#"{
            "diagnosisResult": {
                "diagnosis": "Melanoma",
                "confidence": 87,
                "recommendation": "Urgent review",
                "similarCases": [
                    {"imageId": "ISIC_0001", "diagnosis": "mel", "similarity": 87, "age": 55.0, "sex": "male", "localization": "back"}
                ]
            },
            "patientContext": {"age": 61, "symptoms": "Bleeding"}
        }"#;

        let request: ConsultationRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.diagnosis_result.similar_cases[0].id, "ISIC_0001");
        assert_eq!(request.patient_context.unwrap().age, Some(61));
    }
}
