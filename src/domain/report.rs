use serde::{Deserialize, Serialize};

use super::StepResult;

/// An executed step as recorded in a run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Log tag of the step (e.g., "SelfHeal")
    pub tag: String,
    /// Whether the step was marked critical in the pipeline
    pub critical: bool,
    /// The step's outcome
    pub result: StepResult,
}

impl ReportEntry {
    /// The `[tag] summary` line written to the activity log and the report
    pub fn status_line(&self) -> String {
        format!("[{}] {}", self.tag, self.result.summary_message())
    }
}

/// Consolidated outcome of a maintenance run.
///
/// # Fields
///
/// - `steps`: results of the steps that actually executed, in order. Truncated
///   after a failed critical step.
/// - `overall_succeeded`: `true` only if the run was neither halted nor
///   cancelled and every executed step succeeded.
/// - `halted_at`: name of the critical step that stopped the run.
/// - `cancelled`: the run was stopped between steps on request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub steps: Vec<ReportEntry>,
    pub overall_succeeded: bool,
    pub halted_at: Option<String>,
    pub cancelled: bool,
}

impl RunReport {
    /// Start an empty report. Success is assumed until a step says otherwise.
    pub fn begin() -> Self {
        Self {
            steps: Vec::new(),
            overall_succeeded: true,
            halted_at: None,
            cancelled: false,
        }
    }

    pub(crate) fn push(&mut self, entry: ReportEntry) {
        if !entry.result.succeeded() {
            self.overall_succeeded = false;
        }
        self.steps.push(entry);
    }

    pub(crate) fn halt(&mut self, step_name: &str) {
        self.overall_succeeded = false;
        self.halted_at = Some(step_name.to_string());
    }

    pub(crate) fn cancel(&mut self) {
        self.overall_succeeded = false;
        self.cancelled = true;
    }

    /// Whether a critical step stopped the run early
    pub fn was_halted(&self) -> bool {
        self.halted_at.is_some()
    }

    /// Iterate over the step results in execution order
    pub fn results(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().map(|e| &e.result)
    }

    /// Render the cumulative `[tag] summary` log shown after a run
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.steps {
            out.push_str(&entry.status_line());
            out.push('\n');
        }
        out
    }
}
