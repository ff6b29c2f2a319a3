//! Init command implementation

use anyhow::{Context, Result, bail};
use std::path::Path;

use winknight::config::Config;

/// Default configuration content for winknight init
pub const DEFAULT_CONFIG: &str = r#"# WinKnight Configuration
# =======================
#
# The full scan creates a restore point, verifies system files (SFC),
# repairs the component store (DISM) and clears temporary files.

# ============================================================================
# SETTINGS
# ============================================================================
#
#   scan_restore_description   - Restore point description used by `winknight scan`
#   manual_restore_description - Restore point description used by `winknight restore-point`
#   restore_point_type         - Checkpoint-Computer -RestorePointType value
#   activity_log               - Optional path of the activity log
#                                (default: Documents/WinKnightReports/activity_log.txt)

[settings]
scan_restore_description = "WinKnight Automated Scan"
manual_restore_description = "WinKnight Manual Backup"
restore_point_type = "MODIFY_SETTINGS"

# ============================================================================
# CLEANUP
# ============================================================================
#
# Directories whose contents are deleted. Leave empty for the defaults:
# the user temp directory, %WINDIR%\Temp and %WINDIR%\Prefetch.

[cleanup]
directories = []

# ============================================================================
# REPAIR
# ============================================================================
#
# dism_scan_first - Run DISM /ScanHealth first and only run /RestoreHealth
#                   when the component store is reported as repairable.
#
# SFC and DISM report their result as text. The phrase rules below decide
# success; override them for non-English Windows installations:
#
#   [repair.sfc]
#   rules = [
#     { patterns = ["keine Integritätsverletzungen"], succeeded = true, message = "SFC scan completed. No integrity violations found." },
#   ]
#
# Rule fields: patterns, succeeded, message, is_regex (false), case_insensitive (true)

[repair]
dism_scan_first = false

# ============================================================================
# PIPELINE
# ============================================================================
#
# Steps of the full scan, in order. A failed critical step stops the run.
# kinds: restore_point, file_integrity, component_store_repair, cache_cleanup

[[pipeline]]
kind = "restore_point"
critical = true

[[pipeline]]
kind = "file_integrity"
critical = false

[[pipeline]]
kind = "component_store_repair"
critical = false

[[pipeline]]
kind = "cache_cleanup"
critical = false
"#;

/// Write the default configuration file
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    // Default to global config path
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created: {}", config_path.display());

    Ok(())
}
