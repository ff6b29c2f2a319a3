//! Activity recorder - append-only log of maintenance events
//!
//! Each call to [`ActivityRecorder::record`] becomes exactly one timestamped line.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::warn;

use crate::domain::ActivityLogEntry;

/// Sink for human-readable status lines
pub trait ActivityRecorder: Send + Sync {
    /// Append a timestamped line. Failures are logged, never returned.
    fn record(&self, message: &str);

    /// Up to `count` most recent lines, oldest first
    fn read_recent(&self, count: usize) -> Vec<String>;
}

/// Records activity to a UTF-8 text file, one entry per line
#[derive(Debug, Clone)]
pub struct FileActivityRecorder {
    path: PathBuf,
}

impl FileActivityRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<Documents>/WinKnightReports/activity_log.txt`
    pub fn default_path() -> PathBuf {
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("WinKnightReports")
            .join("activity_log.txt")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, entry: &ActivityLogEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open activity log: {}", self.path.display()))?;

        // Serialize writers from other processes (GUI and CLI may share the log)
        file.lock_exclusive()
            .with_context(|| "Failed to acquire activity log lock")?;
        let written = writeln!(file, "{}", entry.to_line())
            .with_context(|| format!("Failed to append to {}", self.path.display()));
        let _ = FileExt::unlock(&file);
        written
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let content = fs::read(&self.path)
            .with_context(|| format!("Failed to read activity log: {}", self.path.display()))?;
        Ok(String::from_utf8_lossy(&content)
            .lines()
            .map(str::to_string)
            .collect())
    }
}

impl ActivityRecorder for FileActivityRecorder {
    fn record(&self, message: &str) {
        let entry = ActivityLogEntry::now(message);
        if let Err(e) = self.append(&entry) {
            warn!(error = %e, "Dropping activity log entry");
        }
    }

    fn read_recent(&self, count: usize) -> Vec<String> {
        if !self.path.exists() {
            return Vec::new();
        }
        match self.read_lines() {
            Ok(lines) => tail(lines, count),
            Err(e) => {
                warn!(error = %e, "Could not read activity log");
                Vec::new()
            }
        }
    }
}

/// Keeps entries in memory; used for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryActivityRecorder {
    lines: Mutex<Vec<String>>,
}

impl MemoryActivityRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ActivityRecorder for MemoryActivityRecorder {
    fn record(&self, message: &str) {
        let line = ActivityLogEntry::now(message).to_line();
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line);
    }

    fn read_recent(&self, count: usize) -> Vec<String> {
        let guard = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        tail(guard.clone(), count)
    }
}

/// Last `count` items of `lines`, original order kept
fn tail(mut lines: Vec<String>, count: usize) -> Vec<String> {
    if lines.len() > count {
        lines.drain(..lines.len() - count);
    }
    lines
}
