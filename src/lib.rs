//! WinKnight - supervised Windows maintenance
//!
//! WinKnight chains the classic repair routine into one supervised run:
//! create a System Restore point, verify system files with SFC, repair the
//! component store with DISM and clear temporary files. Each step reports a
//! [`StepResult`]; the [`maintenance::MaintenanceOrchestrator`] stops early when a
//! critical step (the restore point) fails and records every outcome in a
//! persisted activity log.

pub mod activity;
pub mod config;
pub mod domain;
pub mod error;
pub mod maintenance;
pub mod system;

pub use domain::*;
pub use error::MaintenanceError;
