use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::MaintenanceError;
use crate::maintenance::MaintenanceStep;
use crate::system::{PrivilegeProbe, RestorePointProvider};
use crate::StepResult;

/// Creates a System Restore point before anything modifies the system
pub struct RestorePointStep {
    provider: Arc<dyn RestorePointProvider>,
    privileges: Arc<dyn PrivilegeProbe>,
    restore_description: String,
}

impl RestorePointStep {
    pub const NAME: &'static str = "RestoreGuard";

    pub fn new(
        provider: Arc<dyn RestorePointProvider>,
        privileges: Arc<dyn PrivilegeProbe>,
        restore_description: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            privileges,
            restore_description: restore_description.into(),
        }
    }
}

#[async_trait]
impl MaintenanceStep for RestorePointStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn tag(&self) -> &str {
        "RestoreGuard"
    }

    fn description(&self) -> &str {
        "Creating system restore point..."
    }

    async fn execute(&self) -> StepResult {
        if !self.privileges.is_elevated() {
            let err = MaintenanceError::PrivilegeRequired("create a system restore point".to_string());
            return StepResult::failure(Self::NAME, err.to_string());
        }

        let mut lines = vec![format!(
            "Requesting restore point '{}'",
            self.restore_description
        )];

        match self.provider.create(&self.restore_description).await {
            Ok(output) => {
                if !output.stdout.trim().is_empty() {
                    lines.push(output.stdout.trim_end().to_string());
                }
                if output.success() {
                    info!(description = %self.restore_description, "Restore point created");
                    StepResult::success(Self::NAME, "System restore point created successfully.")
                        .with_log_lines(lines)
                } else {
                    let code = output.exit_code.unwrap_or(-1);
                    let error = MaintenanceError::ProcessStatus {
                        program: "Checkpoint-Computer".to_string(),
                        code,
                        stderr: output.stderr.trim().to_string(),
                    };
                    warn!(%error, "Restore point creation failed");
                    let detail = if output.stderr.trim().is_empty() {
                        format!("exit code {}", code)
                    } else {
                        output.stderr.trim().to_string()
                    };
                    lines.push(format!("Error: {}", error));
                    StepResult::failure(
                        Self::NAME,
                        format!("Failed to create system restore point. Error: {}", detail),
                    )
                    .with_log_lines(lines)
                }
            }
            Err(e) => {
                warn!(error = %e, "Restore point provider error");
                lines.push(format!("Exception: {}", e));
                StepResult::failure(Self::NAME, format!("An error occurred: {}", e))
                    .with_log_lines(lines)
            }
        }
    }
}
