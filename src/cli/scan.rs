//! Scan command implementation (full maintenance run)

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use winknight::RunReport;
use winknight::config::Config;
use winknight::maintenance::steps::RestorePointStep;
use winknight::maintenance::{PipelineCollaborators, build_pipeline};

use super::{ProgressSink, RESTORE_ADVICE, print_report, recorder_for, run_pipeline};

/// Run the configured pipeline. Returns the overall success flag.
///
/// With `json`, stdout carries nothing but the serialized [`RunReport`];
/// progress and advice go to stderr.
pub async fn scan_command(config_path: Option<&Path>, json: bool) -> Result<bool> {
    let config = Config::load(config_path)?;
    let collab = PipelineCollaborators::system(&config);
    let pipeline = build_pipeline(&config, &collab);
    let recorder = recorder_for(&config);

    let sink = progress_sink(json);
    if sink == ProgressSink::Stdout {
        println!("Starting WinKnight scan ({} steps)...", pipeline.len());
    }
    let report = run_pipeline(pipeline, recorder, sink).await;

    if json {
        write_json_report(&mut std::io::stdout().lock(), &report)?;
    } else {
        print_report(&report);
    }

    if report.halted_at.as_deref() == Some(RestorePointStep::NAME) {
        eprintln!("{}", RESTORE_ADVICE);
    }

    Ok(report.overall_succeeded)
}

fn progress_sink(json: bool) -> ProgressSink {
    if json {
        ProgressSink::Stderr
    } else {
        ProgressSink::Stdout
    }
}

fn write_json_report(out: &mut impl Write, report: &RunReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("Failed to serialize run report")?;
    writeln!(out).context("Failed to write run report")?;
    Ok(())
}
