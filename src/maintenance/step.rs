//! Generic maintenance step trait

use async_trait::async_trait;

use crate::StepResult;

/// A named unit of work in a maintenance pipeline
#[async_trait]
pub trait MaintenanceStep: Send + Sync {
    /// Identifier carried into the step result (e.g., "SelfHeal:SFC")
    fn name(&self) -> &str;

    /// Prefix used for report and activity log lines (e.g., "SelfHeal")
    fn tag(&self) -> &str;

    /// What the step is doing, shown in progress notifications
    fn description(&self) -> &str;

    /// Run the step once.
    ///
    /// Must not fail: errors from the underlying tools are folded into a failed
    /// [`StepResult`] carrying the error text.
    async fn execute(&self) -> StepResult;
}
