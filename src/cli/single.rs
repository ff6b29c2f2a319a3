//! Commands that run a single repair or cleanup step

use anyhow::Result;
use std::path::Path;

use winknight::config::Config;
use winknight::maintenance::{PipelineCollaborators, PipelineStep, StepKind, build_step};

use super::{ProgressSink, print_report, recorder_for, run_pipeline};

/// Run one step on its own and print its diagnostic log
pub async fn single_step_command(config_path: Option<&Path>, kind: StepKind) -> Result<bool> {
    let config = Config::load(config_path)?;
    let collab = PipelineCollaborators::system(&config);
    let step = build_step(kind, &config, &collab, &config.settings.manual_restore_description);

    let report = run_pipeline(
        vec![PipelineStep::best_effort(step)],
        recorder_for(&config),
        ProgressSink::Stdout,
    )
    .await;

    for result in report.results() {
        for line in result.log_lines() {
            println!("  {}", line);
        }
    }
    print_report(&report);

    Ok(report.overall_succeeded)
}
