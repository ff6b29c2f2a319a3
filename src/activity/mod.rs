//! Persisted activity log

mod recorder;

pub use recorder::{ActivityRecorder, FileActivityRecorder, MemoryActivityRecorder};
