use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use super::{classified_result, push_output};
use crate::error::MaintenanceError;
use crate::maintenance::classify::{OutputClassifier, PhraseClassifier};
use crate::maintenance::MaintenanceStep;
use crate::system::{CommandRunner, PrivilegeProbe};
use crate::StepResult;

const UNREPAIRED: &str = "SFC scan completed, but issues were found that could not be repaired.";

/// Verifies protected system files with `sfc /scannow`
pub struct FileIntegrityStep {
    runner: Arc<dyn CommandRunner>,
    privileges: Arc<dyn PrivilegeProbe>,
    classifier: Arc<dyn OutputClassifier>,
}

impl FileIntegrityStep {
    pub const NAME: &'static str = "SelfHeal:SFC";

    pub fn new(runner: Arc<dyn CommandRunner>, privileges: Arc<dyn PrivilegeProbe>) -> Self {
        Self {
            runner,
            privileges,
            classifier: Arc::new(PhraseClassifier::sfc_default()),
        }
    }

    /// Replace the output classifier (e.g., for localized SFC output)
    pub fn with_classifier(mut self, classifier: Arc<dyn OutputClassifier>) -> Self {
        self.classifier = classifier;
        self
    }
}

#[async_trait]
impl MaintenanceStep for FileIntegrityStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn tag(&self) -> &str {
        "SelfHeal"
    }

    fn description(&self) -> &str {
        "Running System File Checker (SFC)..."
    }

    async fn execute(&self) -> StepResult {
        if !self.privileges.is_elevated() {
            let err = MaintenanceError::PrivilegeRequired("run SFC".to_string());
            return StepResult::failure(Self::NAME, err.to_string());
        }

        let mut lines = vec!["Starting SFC /scannow...".to_string()];
        let args = vec!["/scannow".to_string()];

        match self.runner.run("sfc.exe", &args).await {
            Ok(output) => {
                push_output(&mut lines, &output.stdout);
                let result = classified_result(
                    Self::NAME,
                    "SFC scan",
                    self.classifier.as_ref(),
                    &output.stdout,
                    UNREPAIRED,
                    lines,
                );
                info!(succeeded = result.succeeded(), "SFC finished");
                result
            }
            Err(e) => {
                warn!(error = %e, "SFC could not run");
                lines.push(format!("Exception: {}", e));
                StepResult::failure(
                    Self::NAME,
                    format!("An error occurred during the SFC scan: {}", e),
                )
                .with_log_lines(lines)
            }
        }
    }
}
