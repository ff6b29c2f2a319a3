//! Configuration loading and management

mod io;
mod pipeline;
mod settings;

pub use pipeline::{PipelineEntry, default_pipeline};
pub use settings::{CleanupSettings, RepairSettings, Settings};

use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::activity::FileActivityRecorder;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Cache cleanup settings
    #[serde(default)]
    pub cleanup: CleanupSettings,

    /// SFC / DISM settings
    #[serde(default)]
    pub repair: RepairSettings,

    /// Full-scan pipeline, in execution order
    #[serde(default = "default_pipeline")]
    pub pipeline: Vec<PipelineEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            cleanup: CleanupSettings::default(),
            repair: RepairSettings::default(),
            pipeline: default_pipeline(),
        }
    }
}

impl Config {
    /// Check the configuration for mistakes that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.is_empty() {
            bail!("The pipeline must contain at least one step");
        }
        for (name, classifier) in [
            ("repair.sfc", &self.repair.sfc),
            ("repair.dism_repair", &self.repair.dism_repair),
            ("repair.dism_scan", &self.repair.dism_scan),
        ] {
            if classifier
                .rules
                .iter()
                .any(|r| r.patterns.is_empty() || r.patterns.iter().any(|p| p.trim().is_empty()))
            {
                // A blank pattern matches any output
                bail!("{} contains a rule with a missing or blank pattern", name);
            }
        }
        Ok(())
    }

    /// Where the activity log lives
    pub fn activity_log_path(&self) -> PathBuf {
        self.settings
            .activity_log
            .clone()
            .unwrap_or_else(FileActivityRecorder::default_path)
    }
}
