//! External process execution
//!
//! Maintenance tools (sfc, dism, powershell) are launched through the
//! [`CommandRunner`] trait so steps can be exercised against scripted output.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::MaintenanceError;

/// Hide the console window of child processes on Windows
#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code (`None` if the process was terminated by a signal)
    pub exit_code: Option<i32>,
    /// Decoded standard output
    pub stdout: String,
    /// Decoded standard error
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for launching external tools
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion, capturing stdout and stderr
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput, MaintenanceError>;
}

/// Runs commands through `tokio::process`
#[derive(Debug, Default, Clone)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput, MaintenanceError> {
        debug!(program, ?args, "Spawning process");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(target_os = "windows")]
        cmd.creation_flags(CREATE_NO_WINDOW);

        let output = cmd.output().await.map_err(|source| MaintenanceError::ProcessSpawn {
            program: program.to_string(),
            source,
        })?;

        let result = ProcessOutput {
            exit_code: output.status.code(),
            stdout: decode_output(&output.stdout),
            stderr: decode_output(&output.stderr),
        };
        debug!(program, exit_code = ?result.exit_code, "Process finished");
        Ok(result)
    }
}

/// Decode console output into a `String`.
///
/// Some Windows tools (sfc in particular) write UTF-16LE into redirected pipes.
/// That output shows up as ASCII interleaved with NUL bytes, which is detected
/// here and decoded accordingly. Everything else is treated as lossy UTF-8.
pub fn decode_output(bytes: &[u8]) -> String {
    if looks_like_utf16le(bytes) {
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let text = String::from_utf16_lossy(&units);
        return text.trim_start_matches('\u{feff}').to_string();
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn looks_like_utf16le(bytes: &[u8]) -> bool {
    if bytes.len() < 2 {
        return false;
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return true;
    }
    let odd_nuls = bytes.iter().skip(1).step_by(2).filter(|b| **b == 0).count();
    // More than half of the high bytes being zero means mostly-ASCII UTF-16
    odd_nuls * 2 > bytes.len() / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode_plain_utf8() {
        assert_eq!(decode_output(b"The operation completed successfully."), "The operation completed successfully.");
    }

    #[test]
    fn test_decode_utf16_without_bom() {
        let bytes = utf16le("Windows Resource Protection did not find any integrity violations.");
        assert_eq!(
            decode_output(&bytes),
            "Windows Resource Protection did not find any integrity violations."
        );
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(utf16le("repaired"));
        assert_eq!(decode_output(&bytes), "repaired");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_output(&[]), "");
    }

    #[test]
    fn test_process_output_success() {
        let ok = ProcessOutput { exit_code: Some(0), ..Default::default() };
        let failed = ProcessOutput { exit_code: Some(1), ..Default::default() };
        let killed = ProcessOutput { exit_code: None, ..Default::default() };
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }
}
