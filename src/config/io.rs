//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.winknight/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".winknight")
    }

    /// Get the global config file path (~/.winknight/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load and validate configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration to `path`.
    ///
    /// The new content lands in `config.toml.tmp` and is renamed over the old
    /// file while `config.toml.lock` is held, so a scan started from a second
    /// shell never reads a half-written config.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let _guard = lock_beside(path)?;
        let staged = path.with_extension("toml.tmp");
        write_synced(&staged, content.as_bytes())?;
        std::fs::rename(&staged, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from `path`, or from ~/.winknight/config.toml.
    /// The global config is created with defaults if it does not exist yet.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let global_path = Self::global_config_path();
        if !global_path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to_file(&global_path) {
                // Read-only home directories still get a working default config
                tracing::warn!("Failed to write default config: {}", e);
            } else {
                tracing::info!("Created {}", global_path.display());
            }
            return Ok(config);
        }

        Self::from_file(&global_path)
    }
}

/// Take an exclusive lock on `<path>.lock`; released when the file is dropped
fn lock_beside(path: &Path) -> Result<File> {
    let lock_path = path.with_extension("toml.lock");
    let lock = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open {}", lock_path.display()))?;
    lock.lock_exclusive()
        .with_context(|| format!("Failed to lock {}", lock_path.display()))?;
    Ok(lock)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .with_context(|| format!("Failed to write {}", path.display()))
}
