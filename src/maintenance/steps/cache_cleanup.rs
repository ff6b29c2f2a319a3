use async_trait::async_trait;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::MaintenanceError;
use crate::maintenance::MaintenanceStep;
use crate::StepResult;

/// Filesystem operations needed by the cleanup step
pub trait CleanupFs: Send + Sync {
    /// Whether `dir` exists and is a directory
    fn dir_exists(&self, dir: &Path) -> bool;

    /// Top-level entries of `dir` as `(path, is_dir)` pairs
    fn list(&self, dir: &Path) -> io::Result<Vec<(PathBuf, bool)>>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct StdCleanupFs;

impl CleanupFs for StdCleanupFs {
    fn dir_exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<(PathBuf, bool)>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // Symlinks are removed as links, never followed
            let is_dir = entry.file_type()?.is_dir();
            entries.push((entry.path(), is_dir));
        }
        Ok(entries)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

/// Temporary-file locations cleaned by default: the user temp directory plus
/// `%WINDIR%\Temp` and `%WINDIR%\Prefetch` on Windows
pub fn default_cache_directories() -> Vec<PathBuf> {
    let mut dirs = vec![std::env::temp_dir()];
    if cfg!(target_os = "windows") {
        let windir = std::env::var_os("WINDIR")
            .or_else(|| std::env::var_os("SystemRoot"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(r"C:\Windows"));
        dirs.push(windir.join("Temp"));
        dirs.push(windir.join("Prefetch"));
    }
    dirs
}

/// Deletes the contents of temporary-file directories.
///
/// Deletion is best-effort per item: an entry that cannot be removed is logged
/// and skipped. Only a directory that cannot be enumerated fails the step, and
/// even then the remaining directories are still cleaned.
pub struct CacheCleanupStep {
    directories: Vec<PathBuf>,
    fs: Arc<dyn CleanupFs>,
}

#[derive(Debug, Default)]
struct CleanupTally {
    files_deleted: usize,
    dirs_deleted: usize,
    skipped: usize,
    failed_locations: usize,
    lines: Vec<String>,
}

impl CacheCleanupStep {
    pub const NAME: &'static str = "CacheCleaner";

    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self::with_fs(directories, Arc::new(StdCleanupFs))
    }

    pub fn with_fs(directories: Vec<PathBuf>, fs: Arc<dyn CleanupFs>) -> Self {
        Self { directories, fs }
    }

    fn clean_all(fs: &dyn CleanupFs, directories: &[PathBuf]) -> CleanupTally {
        let mut tally = CleanupTally::default();
        for dir in directories {
            tally.lines.push(format!("Attempting to clean: {}", dir.display()));
            if !fs.dir_exists(dir) {
                tally.lines.push("Directory does not exist.".to_string());
                continue;
            }
            if let Err(e) = Self::clean_dir(fs, dir, &mut tally) {
                warn!(dir = %dir.display(), error = %e, "Cleanup location failed");
                tally.failed_locations += 1;
                tally.lines.push(format!(
                    "An error occurred while cleaning {}: {}",
                    dir.display(),
                    e
                ));
            }
        }
        tally
    }

    fn clean_dir(
        fs: &dyn CleanupFs,
        dir: &Path,
        tally: &mut CleanupTally,
    ) -> Result<(), MaintenanceError> {
        let entries = fs.list(dir).map_err(|e| MaintenanceError::io(dir, e))?;
        let (subdirs, files): (Vec<_>, Vec<_>) = entries.into_iter().partition(|(_, is_dir)| *is_dir);

        for (file, _) in files {
            match fs.remove_file(&file) {
                Ok(()) => {
                    tally.files_deleted += 1;
                    tally.lines.push(format!("Deleted file: {}", file.display()));
                }
                Err(e) => {
                    tally.skipped += 1;
                    tally
                        .lines
                        .push(format!("Could not delete file {}: {}", file.display(), e));
                }
            }
        }

        for (subdir, _) in subdirs {
            match fs.remove_dir_all(&subdir) {
                Ok(()) => {
                    tally.dirs_deleted += 1;
                    tally
                        .lines
                        .push(format!("Deleted directory: {}", subdir.display()));
                }
                Err(e) => {
                    tally.skipped += 1;
                    tally.lines.push(format!(
                        "Could not delete directory {}: {}",
                        subdir.display(),
                        e
                    ));
                }
            }
        }

        debug!(dir = %dir.display(), "Directory cleaned");
        Ok(())
    }
}

#[async_trait]
impl MaintenanceStep for CacheCleanupStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn tag(&self) -> &str {
        "CacheCleaner"
    }

    fn description(&self) -> &str {
        "Clearing temporary files..."
    }

    async fn execute(&self) -> StepResult {
        let fs = Arc::clone(&self.fs);
        let directories = self.directories.clone();
        let joined =
            tokio::task::spawn_blocking(move || Self::clean_all(fs.as_ref(), &directories)).await;

        let tally = match joined {
            Ok(tally) => tally,
            Err(e) => {
                warn!(error = %e, "Cleanup task aborted");
                return StepResult::failure(
                    Self::NAME,
                    format!("Cache cleanup failed: {}", e),
                );
            }
        };

        info!(
            files = tally.files_deleted,
            dirs = tally.dirs_deleted,
            skipped = tally.skipped,
            "Cache cleanup finished"
        );

        if tally.failed_locations > 0 {
            return StepResult::failure(Self::NAME, "Cache cleanup failed in one or more locations.")
                .with_log_lines(tally.lines);
        }

        let mut summary = format!(
            "Cache cleanup completed. Removed {} files and {} directories.",
            tally.files_deleted, tally.dirs_deleted
        );
        if tally.skipped > 0 {
            summary.push_str(&format!(" {} items were in use and skipped.", tally.skipped));
        }
        StepResult::success(Self::NAME, summary).with_log_lines(tally.lines)
    }
}
