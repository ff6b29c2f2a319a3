//! System Restore point creation

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::process::{CommandRunner, ProcessOutput};
use crate::error::MaintenanceError;

/// An existing restore point as reported by `Get-ComputerRestorePoint`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestorePointInfo {
    pub sequence_number: u32,
    /// WMI datetime, e.g. `20261017093000.000000-000`
    pub creation_time: String,
    #[serde(default)]
    pub description: String,
}

impl RestorePointInfo {
    /// Creation time without the WMI fraction and UTC offset
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        let stamp = self.creation_time.get(..14)?;
        NaiveDateTime::parse_from_str(stamp, "%Y%m%d%H%M%S").ok()
    }
}

/// Creates and lists System Restore points
#[async_trait]
pub trait RestorePointProvider: Send + Sync {
    /// Request a new restore point. The returned exit code decides success.
    async fn create(&self, description: &str) -> Result<ProcessOutput, MaintenanceError>;

    /// Existing restore points, oldest first
    async fn list(&self) -> Result<Vec<RestorePointInfo>, MaintenanceError>;
}

/// Creates restore points via PowerShell `Checkpoint-Computer`
pub struct PowerShellRestorePoints {
    runner: Arc<dyn CommandRunner>,
    restore_point_type: String,
}

impl PowerShellRestorePoints {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            restore_point_type: "MODIFY_SETTINGS".to_string(),
        }
    }

    /// Override the `-RestorePointType` argument (e.g. "APPLICATION_INSTALL")
    pub fn with_restore_point_type(mut self, kind: impl Into<String>) -> Self {
        self.restore_point_type = kind.into();
        self
    }

    /// Build the PowerShell argument list for a description
    pub fn build_args(&self, description: &str) -> Vec<String> {
        let script = format!(
            "Checkpoint-Computer -Description '{}' -RestorePointType '{}'",
            quote_single(description),
            quote_single(&self.restore_point_type)
        );
        vec![
            "-NoProfile".to_string(),
            "-NonInteractive".to_string(),
            "-Command".to_string(),
            script,
        ]
    }

    fn list_args() -> Vec<String> {
        vec![
            "-NoProfile".to_string(),
            "-NonInteractive".to_string(),
            "-Command".to_string(),
            "Get-ComputerRestorePoint | Select-Object SequenceNumber, CreationTime, Description | ConvertTo-Json -Compress"
                .to_string(),
        ]
    }
}

#[async_trait]
impl RestorePointProvider for PowerShellRestorePoints {
    async fn create(&self, description: &str) -> Result<ProcessOutput, MaintenanceError> {
        let args = self.build_args(description);
        self.runner.run("powershell.exe", &args).await
    }

    async fn list(&self) -> Result<Vec<RestorePointInfo>, MaintenanceError> {
        let output = self.runner.run("powershell.exe", &Self::list_args()).await?;
        if !output.success() {
            return Err(MaintenanceError::ProcessStatus {
                program: "Get-ComputerRestorePoint".to_string(),
                code: output.exit_code.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            });
        }
        let mut points =
            parse_restore_points(&output.stdout).map_err(|source| MaintenanceError::Parse {
                what: "restore point list".to_string(),
                source,
            })?;
        points.sort_by_key(|p| p.sequence_number);
        Ok(points)
    }
}

/// `ConvertTo-Json` emits a bare object for one item and nothing for none
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RestorePointInfo>),
    One(RestorePointInfo),
}

fn parse_restore_points(stdout: &str) -> Result<Vec<RestorePointInfo>, serde_json::Error> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    Ok(match serde_json::from_str(trimmed)? {
        OneOrMany::Many(points) => points,
        OneOrMany::One(point) => vec![point],
    })
}

/// Escape a value for a single-quoted PowerShell string literal
fn quote_single(value: &str) -> String {
    value.replace('\'', "''")
}
