//! Error taxonomy for maintenance operations
//!
//! These errors never cross a step boundary: every [`crate::maintenance::MaintenanceStep`]
//! converts them into a failed [`crate::StepResult`]. They exist so that collaborators
//! (process runner, restore-point provider, filesystem) can report precisely what went wrong.

use std::path::PathBuf;

/// Error type for external collaborators used by maintenance steps
#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
    #[error("Administrator privileges are required to {0}.")]
    PrivilegeRequired(String),

    #[error("Failed to start '{program}': {source}")]
    ProcessSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with status {code}: {stderr}")]
    ProcessStatus {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the outcome of {0} from its output")]
    ClassificationAmbiguity(String),

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MaintenanceError {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
