//! Channel-backed progress
//!
//! [`ChannelProgress`] turns notifier callbacks into [`ConsultationEvent`]
//! values on an unbounded `tokio::sync::mpsc` channel, so a caller can
//! stream per-specialist completion while the consultation is running.
//! Dropping the receiver is harmless: events are then discarded.

use consult_application::ports::progress::ConsultationProgressNotifier;
use consult_domain::{ConsultationStage, SpecialistProfile};
use tokio::sync::mpsc;

/// One progress event of a running consultation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsultationEvent {
    StageStarted {
        stage: ConsultationStage,
        total_tasks: usize,
    },
    SpecialistFinished {
        /// Roster position
        index: usize,
        role: String,
        name: String,
        success: bool,
    },
    CoordinatorFinished {
        success: bool,
    },
    StageCompleted {
        stage: ConsultationStage,
    },
}

/// Progress notifier that forwards events to a channel
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<ConsultationEvent>,
}

impl ChannelProgress {
    pub fn new(tx: mpsc::UnboundedSender<ConsultationEvent>) -> Self {
        Self { tx }
    }

    /// Create a notifier together with the receiving end of its channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ConsultationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn emit(&self, event: ConsultationEvent) {
        let _ = self.tx.send(event);
    }
}

impl ConsultationProgressNotifier for ChannelProgress {
    fn on_stage_start(&self, stage: ConsultationStage, total_tasks: usize) {
        self.emit(ConsultationEvent::StageStarted { stage, total_tasks });
    }

    fn on_specialist_complete(&self, index: usize, profile: &SpecialistProfile, success: bool) {
        self.emit(ConsultationEvent::SpecialistFinished {
            index,
            role: profile.role.clone(),
            name: profile.name.clone(),
            success,
        });
    }

    fn on_coordinator_complete(&self, _profile: &SpecialistProfile, success: bool) {
        self.emit(ConsultationEvent::CoordinatorFinished { success });
    }

    fn on_stage_complete(&self, stage: ConsultationStage) {
        self.emit(ConsultationEvent::StageCompleted { stage });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_are_forwarded_in_call_order() {
        let (progress, mut rx) = ChannelProgress::channel();
        let roster = SpecialistProfile::default_roster();

        progress.on_stage_start(ConsultationStage::Specialists, 2);
        progress.on_specialist_complete(1, &roster[1], true);
        progress.on_specialist_complete(0, &roster[0], false);
        progress.on_stage_complete(ConsultationStage::Specialists);
        progress.on_coordinator_complete(&SpecialistProfile::coordinator(), true);
        drop(progress);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(
            events,
            vec![
                ConsultationEvent::StageStarted {
                    stage: ConsultationStage::Specialists,
                    total_tasks: 2
                },
                ConsultationEvent::SpecialistFinished {
                    index: 1,
                    role: "Dermatologist".to_string(),
                    name: "Dr. Sarah Chen".to_string(),
                    success: true
                },
                ConsultationEvent::SpecialistFinished {
                    index: 0,
                    role: "Diagnostic AI".to_string(),
                    name: "AI Diagnostic System".to_string(),
                    success: false
                },
                ConsultationEvent::StageCompleted {
                    stage: ConsultationStage::Specialists
                },
                ConsultationEvent::CoordinatorFinished { success: true },
            ]
        );
    }

    #[test]
    fn test_closed_receiver_is_ignored() {
        let (progress, rx) = ChannelProgress::channel();
        drop(rx);
        progress.on_stage_complete(ConsultationStage::Coordinator);
    }
}
