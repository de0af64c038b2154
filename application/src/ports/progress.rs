//! Progress notification port
//!
//! Defines the interface for reporting progress during a consultation.

use consult_domain::{ConsultationStage, SpecialistProfile};

/// Callback for progress updates during a consultation
///
/// Calls are driven by real completion: one `on_specialist_complete` per
/// finished specialist call, one `on_coordinator_complete` for the
/// synthesis call. Implementations live in the presentation layer.
pub trait ConsultationProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: ConsultationStage, total_tasks: usize);

    /// Called when a specialist call finishes (`index` is the roster position)
    fn on_specialist_complete(&self, index: usize, profile: &SpecialistProfile, success: bool);

    /// Called when the coordinator call finishes
    fn on_coordinator_complete(&self, profile: &SpecialistProfile, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: ConsultationStage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConsultationProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: ConsultationStage, _total_tasks: usize) {}
    fn on_specialist_complete(&self, _index: usize, _profile: &SpecialistProfile, _success: bool) {}
    fn on_coordinator_complete(&self, _profile: &SpecialistProfile, _success: bool) {}
    fn on_stage_complete(&self, _stage: ConsultationStage) {}
}
