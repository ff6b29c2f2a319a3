//! CLI command implementations

pub mod init;
pub mod log;
pub mod restore;
pub mod scan;
pub mod single;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::warn;

use winknight::activity::{ActivityRecorder, FileActivityRecorder};
use winknight::config::Config;
use winknight::maintenance::{MaintenanceOrchestrator, PipelineStep, ProgressEvent};
use winknight::RunReport;

/// Shown when the restore point that guards a run could not be created
pub const RESTORE_ADVICE: &str =
    "Creating a system restore point failed. Please enable System Restore in Windows and try again.";

/// Activity recorder for the configured log location
pub fn recorder_for(config: &Config) -> Arc<dyn ActivityRecorder> {
    Arc::new(FileActivityRecorder::new(config.activity_log_path()))
}

/// Where progress lines go while a pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSink {
    Stdout,
    /// Keeps stdout free for machine-readable output
    Stderr,
}

/// Run a pipeline, printing progress lines and honouring Ctrl-C between steps
pub async fn run_pipeline(
    pipeline: Vec<PipelineStep>,
    recorder: Arc<dyn ActivityRecorder>,
    sink: ProgressSink,
) -> RunReport {
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<ProgressEvent>();
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let printer = tokio::spawn(async move {
        while let Some(event) = progress_rx.recv().await {
            match sink {
                ProgressSink::Stdout => println!("{}", event.message),
                ProgressSink::Stderr => eprintln!("{}", event.message),
            }
        }
    });

    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Cancellation requested; stopping after the current step...");
            let _ = cancel_tx.send(true);
        }
    });

    let orchestrator = MaintenanceOrchestrator::new(pipeline, recorder)
        .with_progress(progress_tx)
        .with_cancellation(cancel_rx);
    let report = orchestrator.run_all().await;

    // Dropping the orchestrator closes the progress channel
    drop(orchestrator);
    ctrl_c.abort();
    if let Err(e) = printer.await {
        warn!("Progress printer failed: {}", e);
    }

    report
}

/// Print the cumulative `[tag] summary` log and the final status
pub fn print_report(report: &RunReport) {
    println!();
    print!("{}", report.render());

    if report.cancelled {
        println!("Run cancelled.");
    } else if report.was_halted() {
        println!("Run stopped early.");
    } else if report.overall_succeeded {
        println!("Scan complete.");
    } else {
        println!("Scan complete with errors.");
    }
}
