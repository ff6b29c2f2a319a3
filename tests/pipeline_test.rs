//! End-to-end runs of configured pipelines with fake system collaborators

mod common;

use std::sync::Arc;
use tempfile::TempDir;

use common::{FakeRestorePoints, LockingFs, ScriptedRunner};
use winknight::activity::{ActivityRecorder, MemoryActivityRecorder};
use winknight::config::{Config, PipelineEntry};
use winknight::maintenance::{
    MaintenanceOrchestrator, PipelineCollaborators, StepKind, build_pipeline,
};
use winknight::system::AssumePrivileges;

fn collaborators(
    runner: ScriptedRunner,
    restore: FakeRestorePoints,
    elevated: bool,
) -> (PipelineCollaborators, Arc<ScriptedRunner>, Arc<FakeRestorePoints>) {
    let runner = Arc::new(runner);
    let restore = Arc::new(restore);
    let collab = PipelineCollaborators {
        runner: runner.clone(),
        privileges: Arc::new(AssumePrivileges(elevated)),
        restore_points: restore.clone(),
        cleanup_fs: Arc::new(LockingFs::default()),
    };
    (collab, runner, restore)
}

fn config_cleaning(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.cleanup.directories = vec![dir.path().to_path_buf()];
    config
}

#[tokio::test]
async fn test_default_pipeline_shape() {
    let temp = TempDir::new().unwrap();
    let config = config_cleaning(&temp);
    let (collab, _, _) = collaborators(ScriptedRunner::new(), FakeRestorePoints::succeeding(), true);

    let pipeline = build_pipeline(&config, &collab);

    let shape: Vec<_> = pipeline
        .iter()
        .map(|p| (p.step.name().to_string(), p.critical))
        .collect();
    assert_eq!(
        shape,
        [
            ("RestoreGuard".to_string(), true),
            ("SelfHeal:SFC".to_string(), false),
            ("SelfHeal:DISM".to_string(), false),
            ("CacheCleaner".to_string(), false),
        ]
    );
}

#[tokio::test]
async fn test_full_scan_happy_path() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("junk.tmp"), b"x").unwrap();
    let config = config_cleaning(&temp);
    let runner = ScriptedRunner::new()
        .then_stdout("Windows Resource Protection did not find any integrity violations.")
        .then_stdout("The restore operation completed successfully.\r\nThe operation completed successfully.");
    let (collab, runner, restore) =
        collaborators(runner, FakeRestorePoints::succeeding(), true);
    let recorder = Arc::new(MemoryActivityRecorder::new());

    let report = MaintenanceOrchestrator::new(build_pipeline(&config, &collab), recorder.clone())
        .run_all()
        .await;

    assert!(report.overall_succeeded);
    assert_eq!(report.steps.len(), 4);
    assert_eq!(restore.requests(), ["WinKnight Automated Scan"]);
    let programs: Vec<_> = runner.calls().into_iter().map(|(p, _)| p).collect();
    assert_eq!(programs, ["sfc.exe", "dism.exe"]);
    assert!(!temp.path().join("junk.tmp").exists());

    let recent = recorder.read_recent(10);
    assert_eq!(recent.len(), 4);
    assert!(recent[0].ends_with("[RestoreGuard] System restore point created successfully."));
    assert!(recent[3].contains("[CacheCleaner] Cache cleanup completed."));
}

#[tokio::test]
async fn test_restore_failure_leaves_system_untouched() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("junk.tmp"), b"x").unwrap();
    let config = config_cleaning(&temp);
    let (collab, runner, _) = collaborators(
        ScriptedRunner::new(),
        FakeRestorePoints::failing(1, "System Restore is disabled."),
        true,
    );

    let report = MaintenanceOrchestrator::new(
        build_pipeline(&config, &collab),
        Arc::new(MemoryActivityRecorder::new()),
    )
    .run_all()
    .await;

    assert_eq!(report.halted_at.as_deref(), Some("RestoreGuard"));
    assert_eq!(report.steps.len(), 1);
    assert!(runner.calls().is_empty());
    assert!(temp.path().join("junk.tmp").exists());
}

#[tokio::test]
async fn test_unelevated_run_halts_at_restore_point() {
    let temp = TempDir::new().unwrap();
    let config = config_cleaning(&temp);
    let (collab, runner, restore) =
        collaborators(ScriptedRunner::new(), FakeRestorePoints::succeeding(), false);

    let report = MaintenanceOrchestrator::new(
        build_pipeline(&config, &collab),
        Arc::new(MemoryActivityRecorder::new()),
    )
    .run_all()
    .await;

    assert!(!report.overall_succeeded);
    assert_eq!(
        report.steps[0].result.summary_message(),
        "Administrator privileges are required to create a system restore point."
    );
    assert!(restore.requests().is_empty());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_custom_pipeline_with_scan_first() {
    let temp = TempDir::new().unwrap();
    let mut config = config_cleaning(&temp);
    config.repair.dism_scan_first = true;
    config.pipeline = vec![
        PipelineEntry::new(StepKind::ComponentStoreRepair, true),
        PipelineEntry::new(StepKind::CacheCleanup, false),
    ];
    let runner = ScriptedRunner::new().then_stdout("No component store corruption detected.");
    let (collab, runner, _) = collaborators(runner, FakeRestorePoints::succeeding(), true);

    let report = MaintenanceOrchestrator::new(
        build_pipeline(&config, &collab),
        Arc::new(MemoryActivityRecorder::new()),
    )
    .run_all()
    .await;

    assert!(report.overall_succeeded);
    assert_eq!(report.steps.len(), 2);
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, ["/Online", "/Cleanup-Image", "/ScanHealth"]);
}
