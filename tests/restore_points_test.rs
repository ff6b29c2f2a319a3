//! Tests for restore point listing through PowerShell

mod common;

use std::sync::Arc;

use common::ScriptedRunner;
use winknight::MaintenanceError;
use winknight::system::{PowerShellRestorePoints, RestorePointProvider};

#[tokio::test]
async fn test_list_parses_and_orders_points() {
    let stdout = r#"[{"SequenceNumber":12,"CreationTime":"20261017093000.000000-000","Description":"WinKnight Automated Scan"},{"SequenceNumber":3,"CreationTime":"20260901080000.000000-000","Description":"Windows Update"}]"#;
    let runner = Arc::new(ScriptedRunner::new().then_stdout(stdout));
    let provider = PowerShellRestorePoints::new(runner.clone());

    let points = provider.list().await.unwrap();

    let numbers: Vec<_> = points.iter().map(|p| p.sequence_number).collect();
    assert_eq!(numbers, [3, 12]);
    assert_eq!(points[1].description, "WinKnight Automated Scan");

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "powershell.exe");
    assert!(calls[0].1[3].starts_with("Get-ComputerRestorePoint"));
}

#[tokio::test]
async fn test_list_without_points_is_empty() {
    let runner = Arc::new(ScriptedRunner::new().then_stdout(""));
    let points = PowerShellRestorePoints::new(runner).list().await.unwrap();
    assert!(points.is_empty());
}

#[tokio::test]
async fn test_list_failure_reports_exit_status() {
    let runner = Arc::new(ScriptedRunner::new().then_exit(1, "Access denied"));
    let err = PowerShellRestorePoints::new(runner).list().await.unwrap_err();
    match err {
        MaintenanceError::ProcessStatus { code, stderr, .. } => {
            assert_eq!(code, 1);
            assert_eq!(stderr, "Access denied");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_list_rejects_garbage_output() {
    let runner = Arc::new(ScriptedRunner::new().then_stdout("Get-ComputerRestorePoint : not recognized"));
    let err = PowerShellRestorePoints::new(runner).list().await.unwrap_err();
    assert!(matches!(err, MaintenanceError::Parse { .. }));
}
