//! Settings configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::maintenance::classify::PhraseClassifier;
use crate::maintenance::steps::default_cache_directories;

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Description of the restore point created at the start of a full scan
    #[serde(default = "default_scan_restore_description")]
    pub scan_restore_description: String,

    /// Description used by `winknight restore-point`
    #[serde(default = "default_manual_restore_description")]
    pub manual_restore_description: String,

    /// `-RestorePointType` passed to Checkpoint-Computer
    #[serde(default = "default_restore_point_type")]
    pub restore_point_type: String,

    /// Activity log location (defaults to Documents/WinKnightReports/activity_log.txt)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_log: Option<PathBuf>,
}

fn default_scan_restore_description() -> String {
    "WinKnight Automated Scan".to_string()
}

fn default_manual_restore_description() -> String {
    "WinKnight Manual Backup".to_string()
}

fn default_restore_point_type() -> String {
    "MODIFY_SETTINGS".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_restore_description: default_scan_restore_description(),
            manual_restore_description: default_manual_restore_description(),
            restore_point_type: default_restore_point_type(),
            activity_log: None,
        }
    }
}

/// Cache cleanup settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupSettings {
    /// Directories whose contents are deleted. Empty means the built-in
    /// temporary-file locations.
    #[serde(default)]
    pub directories: Vec<PathBuf>,
}

impl CleanupSettings {
    pub fn resolved_directories(&self) -> Vec<PathBuf> {
        if self.directories.is_empty() {
            default_cache_directories()
        } else {
            self.directories.clone()
        }
    }
}

/// SFC / DISM settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairSettings {
    /// Run `DISM /ScanHealth` first and only repair a store reported as repairable
    #[serde(default)]
    pub dism_scan_first: bool,

    /// Phrase rules for `sfc /scannow` output
    #[serde(default = "PhraseClassifier::sfc_default")]
    pub sfc: PhraseClassifier,

    /// Phrase rules for `DISM /RestoreHealth` output
    #[serde(default = "PhraseClassifier::dism_repair_default")]
    pub dism_repair: PhraseClassifier,

    /// Phrase rules for `DISM /ScanHealth` output (scan-first mode only)
    #[serde(default = "PhraseClassifier::dism_scan_default")]
    pub dism_scan: PhraseClassifier,
}

impl Default for RepairSettings {
    fn default() -> Self {
        Self {
            dism_scan_first: false,
            sfc: PhraseClassifier::sfc_default(),
            dism_repair: PhraseClassifier::dism_repair_default(),
            dism_scan: PhraseClassifier::dism_scan_default(),
        }
    }
}
