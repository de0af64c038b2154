//! Run Consultation use case
//!
//! Orchestrates the full consultation flow: concurrent specialist fan-out,
//! coordinator synthesis, agreement scoring.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{ConsultationProgressNotifier, NoProgress};
use crate::use_cases::invoke::invoke_persona;
use consult_domain::{
    AgentResponse, ConsensusResult, ConsultationPrompt, ConsultationRequest, ConsultationResponse,
    ConsultationStage, DiagnosisResult, Model, PatientContext, SpecialistProfile,
    agreement_score, parse_consensus_response, parse_specialist_response,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a consultation
///
/// Any failure aborts the whole consultation; there is no partial result.
#[derive(Error, Debug)]
pub enum ConsultationError {
    #[error("No specialists configured")]
    NoSpecialists,

    #[error("Specialist {name} ({role}) failed: {source}")]
    Specialist {
        role: String,
        name: String,
        source: GatewayError,
    },

    #[error("Specialist task aborted: {0}")]
    SpecialistTask(String),

    #[error("Coordinator synthesis failed: {0}")]
    Coordinator(#[source] GatewayError),

    #[error("Consultation cancelled")]
    Cancelled,
}

impl ConsultationError {
    /// The stage that failed, if the failure belongs to one
    pub fn stage(&self) -> Option<ConsultationStage> {
        match self {
            ConsultationError::Specialist { .. } | ConsultationError::SpecialistTask(_) => {
                Some(ConsultationStage::Specialists)
            }
            ConsultationError::Coordinator(_) => Some(ConsultationStage::Coordinator),
            ConsultationError::NoSpecialists | ConsultationError::Cancelled => None,
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConsultationError::Cancelled)
    }
}

/// Input for the RunConsultation use case
#[derive(Debug, Clone)]
pub struct RunConsultationInput {
    /// Candidate diagnosis from the similarity search
    pub diagnosis: DiagnosisResult,
    /// Optional clinical context
    pub patient_context: Option<PatientContext>,
    /// Ordered specialist roster; output follows this order
    pub specialists: Vec<SpecialistProfile>,
    /// Persona used for the synthesis stage
    pub coordinator: SpecialistProfile,
    /// Model backing every specialist
    pub specialist_model: Model,
    /// Model backing the coordinator
    pub coordinator_model: Model,
}

impl RunConsultationInput {
    /// Input with the default roster, coordinator and model
    pub fn new(diagnosis: DiagnosisResult) -> Self {
        Self {
            diagnosis,
            patient_context: None,
            specialists: SpecialistProfile::default_roster(),
            coordinator: SpecialistProfile::coordinator(),
            specialist_model: Model::default(),
            coordinator_model: Model::default(),
        }
    }

    /// Input built from a boundary request
    pub fn from_request(request: ConsultationRequest) -> Self {
        let mut input = Self::new(request.diagnosis_result);
        input.patient_context = request.patient_context;
        input
    }

    pub fn with_specialists(mut self, specialists: Vec<SpecialistProfile>) -> Self {
        self.specialists = specialists;
        self
    }

    /// Use `specialist` for the fan-out and `coordinator` for synthesis
    pub fn with_models(mut self, specialist: Model, coordinator: Model) -> Self {
        self.specialist_model = specialist;
        self.coordinator_model = coordinator;
        self
    }
}

/// Use case for running a multi-specialist consultation
pub struct RunConsultationUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: ExecutionParams,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> RunConsultationUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            params: ExecutionParams::default(),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Abort the consultation (and every in-flight call) when `token` fires
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunConsultationInput,
    ) -> Result<ConsultationResponse, ConsultationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunConsultationInput,
        progress: &dyn ConsultationProgressNotifier,
    ) -> Result<ConsultationResponse, ConsultationError> {
        if input.specialists.is_empty() {
            return Err(ConsultationError::NoSpecialists);
        }

        info!(
            "Starting consultation on '{}' with {} specialists",
            input.diagnosis.diagnosis,
            input.specialists.len()
        );
        let started = Instant::now();

        // Stage 1: Specialists
        let specialists = self.stage_specialists(&input, progress).await?;

        // Stage 2: Coordinator
        let consensus = self.stage_coordinator(&input, &specialists, progress).await?;

        let mut response = ConsultationResponse {
            consensus,
            specialists,
            agreement_score: 0,
            processing_time: 0,
        };
        response.agreement_score = agreement_score(&response.confidences());
        response.processing_time = started.elapsed().as_millis() as u64;

        info!(
            agreement_score = response.agreement_score,
            processing_time_ms = response.processing_time,
            "Consultation complete"
        );

        Ok(response)
    }

    /// Stage 1: Query every specialist concurrently, all-or-nothing
    async fn stage_specialists(
        &self,
        input: &RunConsultationInput,
        progress: &dyn ConsultationProgressNotifier,
    ) -> Result<Vec<AgentResponse>, ConsultationError> {
        let total = input.specialists.len();
        info!("Stage 1: Specialist Review");
        progress.on_stage_start(ConsultationStage::Specialists, total);

        let case: Arc<str> = Arc::from(ConsultationPrompt::case_description(
            &input.diagnosis,
            input.patient_context.as_ref(),
        ));
        debug!(bytes = case.len(), "Case description built");

        let mut join_set = JoinSet::new();

        for (index, profile) in input.specialists.iter().cloned().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let model = input.specialist_model.clone();
            let case = Arc::clone(&case);
            let params = self.params.clone();

            join_set.spawn(async move {
                let result =
                    invoke_persona(gateway.as_ref(), &model, &profile, &case, &params).await;
                (index, profile, result)
            });
        }

        // Slots are indexed by roster position so arrival order never leaks
        // into the output.
        let mut slots: Vec<Option<AgentResponse>> = vec![None; total];

        while let Some(joined) = self.cancellable(join_set.join_next()).await? {
            match joined {
                Ok((index, profile, Ok(content))) => {
                    info!("Specialist {} responded", profile);
                    progress.on_specialist_complete(index, &profile, true);

                    let parsed = parse_specialist_response(&content);
                    slots[index] = Some(AgentResponse {
                        role: profile.role,
                        name: profile.name,
                        assessment: parsed.assessment,
                        confidence: parsed.confidence,
                        key_findings: parsed.key_findings,
                        recommendations: parsed.recommendations,
                    });
                }
                Ok((index, profile, Err(e))) => {
                    warn!("Specialist {} failed: {}", profile, e);
                    progress.on_specialist_complete(index, &profile, false);
                    join_set.abort_all();
                    return Err(ConsultationError::Specialist {
                        role: profile.role,
                        name: profile.name,
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Specialist task join error: {}", e);
                    join_set.abort_all();
                    return Err(ConsultationError::SpecialistTask(e.to_string()));
                }
            }
        }

        progress.on_stage_complete(ConsultationStage::Specialists);

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ConsultationError::SpecialistTask("missing specialist result".into()))
    }

    /// Stage 2: Synthesize every specialist opinion into a consensus
    async fn stage_coordinator(
        &self,
        input: &RunConsultationInput,
        specialists: &[AgentResponse],
        progress: &dyn ConsultationProgressNotifier,
    ) -> Result<ConsensusResult, ConsultationError> {
        info!("Stage 2: Coordinator Synthesis");
        progress.on_stage_start(ConsultationStage::Coordinator, 1);

        let prompt = ConsultationPrompt::synthesis_prompt(specialists, &input.diagnosis);
        let result = self
            .cancellable(invoke_persona(
                self.gateway.as_ref(),
                &input.coordinator_model,
                &input.coordinator,
                &prompt,
                &self.params,
            ))
            .await?;

        match result {
            Ok(content) => {
                progress.on_coordinator_complete(&input.coordinator, true);
                progress.on_stage_complete(ConsultationStage::Coordinator);
                Ok(parse_consensus_response(&content, &input.diagnosis))
            }
            Err(e) => {
                warn!("Coordinator {} failed: {}", input.coordinator, e);
                progress.on_coordinator_complete(&input.coordinator, false);
                Err(ConsultationError::Coordinator(e))
            }
        }
    }

    /// Race `fut` against the cancellation token, if one is set
    async fn cancellable<F: Future>(&self, fut: F) -> Result<F::Output, ConsultationError> {
        match &self.cancellation_token {
            Some(token) => tokio::select! {
                _ = token.cancelled() => {
                    info!("Consultation cancelled");
                    Err(ConsultationError::Cancelled)
                }
                output = fut => Ok(output),
            },
            None => Ok(fut.await),
        }
    }
}
