//! Manual restore point command

use anyhow::Result;
use std::path::Path;

use winknight::MaintenanceError;
use winknight::config::Config;
use winknight::maintenance::{PipelineCollaborators, PipelineStep, StepKind, build_step};

use super::{ProgressSink, RESTORE_ADVICE, recorder_for, run_pipeline};

/// Create a restore point outside a full scan
pub async fn restore_point_command(
    config_path: Option<&Path>,
    description: Option<String>,
) -> Result<bool> {
    let config = Config::load(config_path)?;
    let collab = PipelineCollaborators::system(&config);
    let description = description.unwrap_or_else(|| config.settings.manual_restore_description.clone());

    let step = build_step(StepKind::RestorePoint, &config, &collab, &description);
    let report = run_pipeline(
        vec![PipelineStep::critical(step)],
        recorder_for(&config),
        ProgressSink::Stdout,
    )
    .await;

    for result in report.results() {
        println!("{}", result.summary_message());
    }
    if !report.overall_succeeded && !report.cancelled {
        eprintln!("{}", RESTORE_ADVICE);
    }

    Ok(report.overall_succeeded)
}

/// Print the restore points Windows currently keeps
pub async fn list_restore_points_command(config_path: Option<&Path>) -> Result<bool> {
    let config = Config::load(config_path)?;
    let collab = PipelineCollaborators::system(&config);
    if !collab.privileges.is_elevated() {
        return Err(MaintenanceError::PrivilegeRequired("list restore points".to_string()).into());
    }

    let points = collab.restore_points.list().await?;
    if points.is_empty() {
        println!("No restore points found.");
        return Ok(true);
    }

    println!("{:>5}  {:<19}  Description", "#", "Created");
    for point in &points {
        let created = point
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| point.creation_time.clone());
        println!("{:>5}  {:<19}  {}", point.sequence_number, created, point.description);
    }
    Ok(true)
}
