//! Log command implementation

use anyhow::Result;
use std::path::Path;

use winknight::activity::{ActivityRecorder, FileActivityRecorder};
use winknight::config::Config;

/// Show the most recent activity log entries
pub fn log_command(config_path: Option<&Path>, count: usize, newest_first: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let recorder = FileActivityRecorder::new(config.activity_log_path());

    let mut lines = recorder.read_recent(count);
    if lines.is_empty() {
        println!("No activity recorded yet ({}).", recorder.path().display());
        return Ok(());
    }

    if newest_first {
        lines.reverse();
    }
    for line in lines {
        println!("{}", line);
    }

    Ok(())
}
