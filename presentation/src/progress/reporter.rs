//! Progress reporting for consultation execution

use colored::Colorize;
use consult_application::ports::progress::ConsultationProgressNotifier;
use consult_domain::{ConsultationStage, SpecialistProfile};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard};

/// Reports progress during a consultation with progress bars on stderr
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_short_name(stage: ConsultationStage) -> &'static str {
        match stage {
            ConsultationStage::Specialists => "Specialists",
            ConsultationStage::Coordinator => "Coordinator",
        }
    }

    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.stage_bar
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Advance the stage bar, or abandon it when a call failed
    fn tick(&self, profile: &SpecialistProfile, success: bool) {
        let mut bar = self.bar();
        if success {
            if let Some(pb) = bar.as_ref() {
                pb.set_message(format!("{} {}", "v".green(), profile));
                pb.inc(1);
            }
        } else if let Some(pb) = bar.take() {
            pb.abandon_with_message(format!("{} {} failed", "x".red(), profile));
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsultationProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: ConsultationStage, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message("Starting...");

        *self.bar() = Some(pb);
    }

    fn on_specialist_complete(&self, _index: usize, profile: &SpecialistProfile, success: bool) {
        self.tick(profile, success);
    }

    fn on_coordinator_complete(&self, profile: &SpecialistProfile, success: bool) {
        self.tick(profile, success);
    }

    fn on_stage_complete(&self, stage: ConsultationStage) {
        if let Some(pb) = self.bar().take() {
            pb.finish_with_message(format!(
                "{} complete!",
                Self::stage_short_name(stage).green()
            ));
        }
    }
}

/// Simple text-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl ConsultationProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: ConsultationStage, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            stage.display_name().bold(),
            total_tasks
        );
    }

    fn on_specialist_complete(&self, _index: usize, profile: &SpecialistProfile, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), profile);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), profile);
        }
    }

    fn on_coordinator_complete(&self, profile: &SpecialistProfile, success: bool) {
        self.on_specialist_complete(0, profile, success);
    }

    fn on_stage_complete(&self, _stage: ConsultationStage) {
        eprintln!();
    }
}
