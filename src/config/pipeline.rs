//! Full-scan pipeline configuration types

use serde::{Deserialize, Serialize};

use crate::maintenance::StepKind;

/// A step in the full-scan pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEntry {
    /// Which step to run
    pub kind: StepKind,
    /// Whether a failure of this step halts the run
    #[serde(default)]
    pub critical: bool,
}

impl PipelineEntry {
    pub fn new(kind: StepKind, critical: bool) -> Self {
        Self { kind, critical }
    }
}

/// Restore point first and fatal; the repairs and cleanup are best-effort
pub fn default_pipeline() -> Vec<PipelineEntry> {
    vec![
        PipelineEntry::new(StepKind::RestorePoint, true),
        PipelineEntry::new(StepKind::FileIntegrity, false),
        PipelineEntry::new(StepKind::ComponentStoreRepair, false),
        PipelineEntry::new(StepKind::CacheCleanup, false),
    ]
}
