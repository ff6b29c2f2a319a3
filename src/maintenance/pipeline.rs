//! Pipeline construction from configuration.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::steps::{
    CacheCleanupStep, CleanupFs, ComponentStoreRepairStep, FileIntegrityStep, RestorePointStep,
    StdCleanupFs,
};
use super::{MaintenanceStep, PipelineStep};
use crate::config::Config;
use crate::system::{
    CommandRunner, PowerShellRestorePoints, PrivilegeProbe, RestorePointProvider,
    SystemCommandRunner, SystemPrivileges,
};

/// The kinds of steps a pipeline can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    RestorePoint,
    FileIntegrity,
    ComponentStoreRepair,
    CacheCleanup,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepKind::RestorePoint => write!(f, "restore_point"),
            StepKind::FileIntegrity => write!(f, "file_integrity"),
            StepKind::ComponentStoreRepair => write!(f, "component_store_repair"),
            StepKind::CacheCleanup => write!(f, "cache_cleanup"),
        }
    }
}

/// External collaborators injected into the steps
#[derive(Clone)]
pub struct PipelineCollaborators {
    pub runner: Arc<dyn CommandRunner>,
    pub privileges: Arc<dyn PrivilegeProbe>,
    pub restore_points: Arc<dyn RestorePointProvider>,
    pub cleanup_fs: Arc<dyn CleanupFs>,
}

impl PipelineCollaborators {
    /// Collaborators backed by the real operating system
    pub fn system(config: &Config) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner);
        let restore_points = PowerShellRestorePoints::new(Arc::clone(&runner))
            .with_restore_point_type(config.settings.restore_point_type.clone());
        Self {
            restore_points: Arc::new(restore_points),
            runner,
            privileges: Arc::new(SystemPrivileges),
            cleanup_fs: Arc::new(StdCleanupFs),
        }
    }
}

/// Build a single step.
///
/// `restore_description` is the description given to a new restore point; the
/// full scan and the manual backup use different ones.
pub fn build_step(
    kind: StepKind,
    config: &Config,
    collab: &PipelineCollaborators,
    restore_description: &str,
) -> Arc<dyn MaintenanceStep> {
    match kind {
        StepKind::RestorePoint => Arc::new(RestorePointStep::new(
            Arc::clone(&collab.restore_points),
            Arc::clone(&collab.privileges),
            restore_description,
        )),
        StepKind::FileIntegrity => Arc::new(
            FileIntegrityStep::new(Arc::clone(&collab.runner), Arc::clone(&collab.privileges))
                .with_classifier(Arc::new(config.repair.sfc.clone())),
        ),
        StepKind::ComponentStoreRepair => {
            let mut step = ComponentStoreRepairStep::new(
                Arc::clone(&collab.runner),
                Arc::clone(&collab.privileges),
            )
            .with_repair_classifier(Arc::new(config.repair.dism_repair.clone()));
            if config.repair.dism_scan_first {
                step = step.with_scan_first(Arc::new(config.repair.dism_scan.clone()));
            }
            Arc::new(step)
        }
        StepKind::CacheCleanup => Arc::new(CacheCleanupStep::with_fs(
            config.cleanup.resolved_directories(),
            Arc::clone(&collab.cleanup_fs),
        )),
    }
}

/// Build the full-scan pipeline described by `config.pipeline`
pub fn build_pipeline(config: &Config, collab: &PipelineCollaborators) -> Vec<PipelineStep> {
    config
        .pipeline
        .iter()
        .map(|entry| PipelineStep {
            step: build_step(
                entry.kind,
                config,
                collab,
                &config.settings.scan_restore_description,
            ),
            critical: entry.critical,
        })
        .collect()
}
