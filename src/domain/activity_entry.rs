use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp layout used as the line prefix in the activity log
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line of the activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Local wall-clock time of the record call
    pub timestamp: NaiveDateTime,

    /// The recorded message (always a single line)
    pub message: String,
}

impl ActivityLogEntry {
    /// Create an entry stamped with the current local time
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            message: flatten(&message.into()),
        }
    }

    /// Format as a log line: `2026-10-17 09:30:00: message`
    pub fn to_line(&self) -> String {
        format!("{}: {}", self.timestamp.format(TIMESTAMP_FORMAT), self.message)
    }

    /// Parse a line written by [`Self::to_line`]. Returns `None` for foreign lines.
    pub fn parse(line: &str) -> Option<Self> {
        let (stamp, message) = line.split_once(": ")?;
        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        Some(Self {
            timestamp,
            message: message.to_string(),
        })
    }
}

/// Collapse line breaks so that one entry never spans multiple lines
fn flatten(message: &str) -> String {
    if !message.contains(['\n', '\r']) {
        return message.to_string();
    }
    message
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
