//! Core domain types for WinKnight

mod activity_entry;
mod report;
mod step_result;

pub use activity_entry::{ActivityLogEntry, TIMESTAMP_FORMAT};
pub use report::{ReportEntry, RunReport};
pub use step_result::StepResult;
