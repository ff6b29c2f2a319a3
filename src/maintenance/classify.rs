//! Classification of external tool output.
//!
//! SFC and DISM report their outcome as free text. A [`PhraseClassifier`] maps
//! that text to a verdict using ordered [`PhraseRule`]s, so locale-specific or
//! version-specific phrasing can be configured without touching the steps.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Verdict produced by a classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A rule matched; carries its success flag and summary
    Matched { succeeded: bool, message: String },
    /// No rule matched the output
    Undetermined,
}

/// Maps raw tool output to a verdict
pub trait OutputClassifier: Send + Sync {
    fn classify(&self, output: &str) -> Classification;
}

/// A single phrase rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseRule {
    /// Any of these patterns selects the rule
    pub patterns: Vec<String>,
    /// Treat patterns as regular expressions
    #[serde(default)]
    pub is_regex: bool,
    /// Ignore case when matching
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive: bool,
    /// Outcome when the rule matches
    pub succeeded: bool,
    /// Summary message when the rule matches
    pub message: String,
}

fn default_case_insensitive() -> bool {
    true
}

impl PhraseRule {
    /// Plain case-insensitive substring rule
    pub fn phrase(pattern: &str, succeeded: bool, message: &str) -> Self {
        Self {
            patterns: vec![pattern.to_string()],
            is_regex: false,
            case_insensitive: true,
            succeeded,
            message: message.to_string(),
        }
    }

    /// Whether any pattern of this rule matches `output`
    pub fn matches(&self, output: &str) -> bool {
        self.patterns.iter().any(|pattern| {
            if self.is_regex {
                let regex_pattern = if self.case_insensitive {
                    format!("(?i){}", pattern)
                } else {
                    pattern.clone()
                };
                match Regex::new(&regex_pattern) {
                    Ok(re) => re.is_match(output),
                    // Invalid regex - fall back to text search
                    Err(_) => contains(output, pattern, self.case_insensitive),
                }
            } else {
                contains(output, pattern, self.case_insensitive)
            }
        })
    }
}

fn contains(haystack: &str, needle: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    }
}

/// First-match-wins phrase classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseClassifier {
    pub rules: Vec<PhraseRule>,
}

impl PhraseClassifier {
    pub fn new(rules: Vec<PhraseRule>) -> Self {
        Self { rules }
    }

    /// SFC: both "no violations" and "repaired" count as success
    pub fn sfc_default() -> Self {
        Self::new(vec![
            PhraseRule::phrase(
                "did not find any integrity violations",
                true,
                "SFC scan completed. No integrity violations found.",
            ),
            PhraseRule::phrase(
                "successfully repaired",
                true,
                "SFC scan completed. Corrupt files were repaired.",
            ),
            PhraseRule::phrase(
                "found corrupt files but was unable to fix",
                false,
                "SFC scan completed, but issues were found that could not be repaired.",
            ),
        ])
    }

    /// DISM /RestoreHealth
    pub fn dism_repair_default() -> Self {
        Self::new(vec![PhraseRule::phrase(
            "The operation completed successfully",
            true,
            "DISM scan and repair completed successfully.",
        )])
    }

    /// DISM /ScanHealth. The "repairable" verdict is a failure here and
    /// triggers the follow-up repair call.
    pub fn dism_scan_default() -> Self {
        Self::new(vec![
            PhraseRule::phrase(
                "No component store corruption detected",
                true,
                "The Windows component store is healthy.",
            ),
            PhraseRule::phrase(
                "The component store is repairable",
                false,
                "The Windows component store is corrupted but repairable.",
            ),
        ])
    }
}

impl OutputClassifier for PhraseClassifier {
    fn classify(&self, output: &str) -> Classification {
        self.rules
            .iter()
            .find(|rule| rule.matches(output))
            .map(|rule| Classification::Matched {
                succeeded: rule.succeeded,
                message: rule.message.clone(),
            })
            .unwrap_or(Classification::Undetermined)
    }
}

impl<F> OutputClassifier for F
where
    F: Fn(&str) -> Classification + Send + Sync,
{
    fn classify(&self, output: &str) -> Classification {
        self(output)
    }
}
