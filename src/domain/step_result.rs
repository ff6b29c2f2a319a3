use serde::{Deserialize, Serialize};

/// Outcome of a single maintenance step
///
/// Every step invocation produces exactly one `StepResult`. The summary is always
/// non-empty; `log_lines` keeps diagnostic text in the order it was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Step identifier (e.g., "RestoreGuard", "SelfHeal:SFC")
    name: String,

    /// Whether the step achieved its goal
    succeeded: bool,

    /// Short human-readable status
    summary_message: String,

    /// Diagnostic output, insertion order preserved
    log_lines: Vec<String>,
}

impl StepResult {
    /// Create a new result. An empty message is replaced with a generic one.
    pub fn new(name: impl Into<String>, succeeded: bool, summary: impl Into<String>) -> Self {
        let name = name.into();
        let mut summary_message = summary.into();
        if summary_message.trim().is_empty() {
            summary_message = if succeeded {
                format!("{} finished", name)
            } else {
                format!("{} failed", name)
            };
        }
        Self {
            name,
            succeeded,
            summary_message,
            log_lines: Vec::new(),
        }
    }

    /// Create a successful result
    pub fn success(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self::new(name, true, summary)
    }

    /// Create a failed result
    pub fn failure(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self::new(name, false, summary)
    }

    /// Attach previously collected log lines
    pub fn with_log_lines(mut self, lines: Vec<String>) -> Self {
        self.log_lines = lines;
        self
    }

    /// Append a single log line
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.log_lines.push(line.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn summary_message(&self) -> &str {
        &self.summary_message
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log_lines
    }
}
