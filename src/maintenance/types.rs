//! Pipeline and progress types.

use std::sync::Arc;

use super::MaintenanceStep;

/// A step together with its failure policy
#[derive(Clone)]
pub struct PipelineStep {
    /// The work to perform
    pub step: Arc<dyn MaintenanceStep>,
    /// A failed critical step halts the remaining pipeline
    pub critical: bool,
}

impl PipelineStep {
    pub fn critical(step: Arc<dyn MaintenanceStep>) -> Self {
        Self {
            step,
            critical: true,
        }
    }

    pub fn best_effort(step: Arc<dyn MaintenanceStep>) -> Self {
        Self {
            step,
            critical: false,
        }
    }
}

impl std::fmt::Debug for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineStep")
            .field("step", &self.step.name())
            .field("critical", &self.critical)
            .finish()
    }
}

/// Progress notification emitted before a step starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Current step index (0-based)
    pub step_index: usize,
    /// Total number of steps in the pipeline
    pub total_steps: usize,
    /// Name of the step about to run
    pub step_name: String,
    /// One-line status, e.g. "Step 2/4: Running System File Checker (SFC)..."
    pub message: String,
}

impl ProgressEvent {
    pub(crate) fn starting(step_index: usize, total_steps: usize, step: &dyn MaintenanceStep) -> Self {
        Self {
            step_index,
            total_steps,
            step_name: step.name().to_string(),
            message: format!(
                "Step {}/{}: {}",
                step_index + 1,
                total_steps,
                step.description()
            ),
        }
    }
}
