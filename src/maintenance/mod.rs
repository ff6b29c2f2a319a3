//! Supervised maintenance runs.
//!
//! This module provides the [`MaintenanceOrchestrator`] which runs an ordered
//! pipeline of maintenance steps (restore point, SFC, DISM, cache cleanup) one at
//! a time. A failed critical step halts the run; failures of best-effort steps
//! only downgrade the overall result.

pub mod classify;
mod pipeline;
mod step;
pub mod steps;
mod types;

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::activity::ActivityRecorder;
use crate::domain::{ReportEntry, RunReport};

pub use pipeline::{PipelineCollaborators, StepKind, build_pipeline, build_step};
pub use step::MaintenanceStep;
pub use types::{PipelineStep, ProgressEvent};

/// Runs maintenance pipelines.
///
/// Steps execute strictly in order and never overlap. Each step is attempted
/// exactly once; there are no retries.
pub struct MaintenanceOrchestrator {
    pipeline: Vec<PipelineStep>,
    recorder: Arc<dyn ActivityRecorder>,
    progress_tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
    cancel_rx: Option<watch::Receiver<bool>>,
}

impl MaintenanceOrchestrator {
    /// Creates an orchestrator for the given pipeline.
    pub fn new(pipeline: Vec<PipelineStep>, recorder: Arc<dyn ActivityRecorder>) -> Self {
        Self {
            pipeline,
            recorder,
            progress_tx: None,
            cancel_rx: None,
        }
    }

    /// Send a [`ProgressEvent`] before each step starts
    pub fn with_progress(mut self, progress_tx: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        self.progress_tx = Some(progress_tx);
        self
    }

    /// Stop between steps once `true` is published on this channel.
    /// A step that is already running always completes.
    pub fn with_cancellation(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    fn cancel_requested(&self) -> bool {
        self.cancel_rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Executes the complete pipeline.
    ///
    /// For each step: emit progress, execute, append `[tag] summary` to the
    /// report and the activity log, then apply the failure policy.
    pub async fn run_all(&self) -> RunReport {
        let total = self.pipeline.len();
        let mut report = RunReport::begin();

        info!(steps = total, "Starting maintenance run");

        for (index, entry) in self.pipeline.iter().enumerate() {
            let step = entry.step.as_ref();

            if self.cancel_requested() {
                warn!(
                    remaining = total - index,
                    "Maintenance run cancelled before '{}'",
                    step.name()
                );
                self.recorder.record(&format!(
                    "[WinKnight] Run cancelled before step {}/{} ({})",
                    index + 1,
                    total,
                    step.name()
                ));
                report.cancel();
                break;
            }

            let progress = ProgressEvent::starting(index, total, step);
            debug!("{}", progress.message);
            if let Some(ref tx) = self.progress_tx {
                let _ = tx.send(progress);
            }

            let result = step.execute().await;
            let report_entry = ReportEntry {
                tag: step.tag().to_string(),
                critical: entry.critical,
                result,
            };
            self.recorder.record(&report_entry.status_line());

            let failed = !report_entry.result.succeeded();
            if failed {
                warn!(
                    step = step.name(),
                    critical = entry.critical,
                    "{}",
                    report_entry.result.summary_message()
                );
            }
            report.push(report_entry);

            if failed && entry.critical {
                report.halt(step.name());
                warn!(
                    "Maintenance run stopped: critical step {} ({}) failed",
                    index + 1,
                    step.name()
                );
                break;
            }
        }

        info!(
            executed = report.steps.len(),
            success = report.overall_succeeded,
            "Maintenance run completed"
        );
        report
    }
}
