//! Concrete maintenance steps.
//!
//! Each step wraps one external collaborator and maps its raw outcome to a
//! [`StepResult`].

mod cache_cleanup;
mod component_store;
mod file_integrity;
mod restore_point;

pub use cache_cleanup::{CacheCleanupStep, CleanupFs, StdCleanupFs, default_cache_directories};
pub use component_store::ComponentStoreRepairStep;
pub use file_integrity::FileIntegrityStep;
pub use restore_point::RestorePointStep;

use super::classify::{Classification, OutputClassifier};
use crate::error::MaintenanceError;
use crate::StepResult;

/// Turn classified tool output into a step result.
///
/// Unrecognised output never counts as success: it fails with `fallback` and
/// records why in the log lines.
fn classified_result(
    name: &str,
    tool: &str,
    classifier: &dyn OutputClassifier,
    output: &str,
    fallback: &str,
    mut lines: Vec<String>,
) -> StepResult {
    match classifier.classify(output) {
        Classification::Matched { succeeded, message } => {
            StepResult::new(name, succeeded, message).with_log_lines(lines)
        }
        Classification::Undetermined => {
            lines.push(MaintenanceError::ClassificationAmbiguity(tool.to_string()).to_string());
            StepResult::failure(name, fallback).with_log_lines(lines)
        }
    }
}

/// Keep tool output in the log, skipping blank output
fn push_output(lines: &mut Vec<String>, output: &str) {
    let trimmed = output.trim_end();
    if !trimmed.trim().is_empty() {
        lines.push(trimmed.to_string());
    }
}
