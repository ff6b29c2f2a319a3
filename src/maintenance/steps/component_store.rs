use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{classified_result, push_output};
use crate::error::MaintenanceError;
use crate::maintenance::classify::{Classification, OutputClassifier, PhraseClassifier};
use crate::maintenance::MaintenanceStep;
use crate::system::{CommandRunner, PrivilegeProbe};
use crate::StepResult;

const REPAIR_FAILED: &str = "DISM failed to complete the repair operation.";
const SCAN_UNDETERMINED: &str = "Unable to determine DISM status. Please review the full output.";

/// Repairs the component store with `DISM /RestoreHealth`.
///
/// With scan-first enabled, `/ScanHealth` runs first: a healthy store finishes the
/// step without repairing, a store reported as repairable gets exactly one
/// `/RestoreHealth` call, and any other scan output fails the step.
pub struct ComponentStoreRepairStep {
    runner: Arc<dyn CommandRunner>,
    privileges: Arc<dyn PrivilegeProbe>,
    repair_classifier: Arc<dyn OutputClassifier>,
    scan_classifier: Option<Arc<dyn OutputClassifier>>,
}

impl ComponentStoreRepairStep {
    pub const NAME: &'static str = "SelfHeal:DISM";

    pub fn new(runner: Arc<dyn CommandRunner>, privileges: Arc<dyn PrivilegeProbe>) -> Self {
        Self {
            runner,
            privileges,
            repair_classifier: Arc::new(PhraseClassifier::dism_repair_default()),
            scan_classifier: None,
        }
    }

    pub fn with_repair_classifier(mut self, classifier: Arc<dyn OutputClassifier>) -> Self {
        self.repair_classifier = classifier;
        self
    }

    /// Enable scan-first mode. In the scan classifier a successful verdict means
    /// "healthy" and a failing verdict means "repairable".
    pub fn with_scan_first(mut self, classifier: Arc<dyn OutputClassifier>) -> Self {
        self.scan_classifier = Some(classifier);
        self
    }

    fn dism_args(action: &str) -> Vec<String> {
        vec![
            "/Online".to_string(),
            "/Cleanup-Image".to_string(),
            format!("/{}", action),
        ]
    }

    async fn repair(&self, mut lines: Vec<String>) -> StepResult {
        lines.push("Starting DISM /RestoreHealth...".to_string());
        match self.runner.run("dism.exe", &Self::dism_args("RestoreHealth")).await {
            Ok(output) => {
                push_output(&mut lines, &output.stdout);
                classified_result(
                    Self::NAME,
                    "DISM repair",
                    self.repair_classifier.as_ref(),
                    &output.stdout,
                    REPAIR_FAILED,
                    lines,
                )
            }
            Err(e) => Self::errored(e, lines),
        }
    }

    fn errored(e: MaintenanceError, mut lines: Vec<String>) -> StepResult {
        warn!(error = %e, "DISM could not run");
        lines.push(format!("Exception: {}", e));
        StepResult::failure(
            Self::NAME,
            format!("An error occurred during the DISM repair: {}", e),
        )
        .with_log_lines(lines)
    }
}

#[async_trait]
impl MaintenanceStep for ComponentStoreRepairStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn tag(&self) -> &str {
        "SelfHeal"
    }

    fn description(&self) -> &str {
        "Running Deployment Image Servicing and Management (DISM)..."
    }

    async fn execute(&self) -> StepResult {
        if !self.privileges.is_elevated() {
            let err = MaintenanceError::PrivilegeRequired("run DISM".to_string());
            return StepResult::failure(Self::NAME, err.to_string());
        }

        let Some(scan_classifier) = &self.scan_classifier else {
            let result = self.repair(Vec::new()).await;
            info!(succeeded = result.succeeded(), "DISM finished");
            return result;
        };

        let mut lines = vec!["Starting DISM /ScanHealth...".to_string()];
        let output = match self.runner.run("dism.exe", &Self::dism_args("ScanHealth")).await {
            Ok(output) => output,
            Err(e) => return Self::errored(e, lines),
        };
        push_output(&mut lines, &output.stdout);

        let result = match scan_classifier.classify(&output.stdout) {
            Classification::Matched {
                succeeded: true,
                message,
            } => StepResult::success(Self::NAME, message).with_log_lines(lines),
            Classification::Matched {
                succeeded: false,
                message,
            } => {
                debug!("Component store repairable, running RestoreHealth");
                lines.push(message);
                self.repair(lines).await
            }
            Classification::Undetermined => {
                lines.push(
                    MaintenanceError::ClassificationAmbiguity("DISM scan".to_string()).to_string(),
                );
                StepResult::failure(Self::NAME, SCAN_UNDETERMINED).with_log_lines(lines)
            }
        };
        info!(succeeded = result.succeeded(), "DISM finished");
        result
    }
}
