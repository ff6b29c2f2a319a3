//! Shared fakes for maintenance integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use winknight::MaintenanceError;
use winknight::StepResult;
use winknight::maintenance::MaintenanceStep;
use winknight::maintenance::steps::{CleanupFs, StdCleanupFs};
use winknight::system::{CommandRunner, ProcessOutput, RestorePointInfo, RestorePointProvider};

/// Step with a fixed outcome that counts its invocations
pub struct ScriptedStep {
    name: String,
    tag: String,
    description: String,
    succeeded: bool,
    calls: Arc<AtomicUsize>,
}

impl ScriptedStep {
    pub fn new(name: &str, tag: &str, succeeded: bool) -> Self {
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
            description: format!("Running {}...", name),
            succeeded,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl MaintenanceStep for ScriptedStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self) -> StepResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let message = if self.succeeded {
            format!("{} succeeded.", self.name)
        } else {
            format!("{} failed.", self.name)
        };
        StepResult::new(&self.name, self.succeeded, message).with_line("scripted")
    }
}

pub fn call_count(calls: &Arc<AtomicUsize>) -> usize {
    calls.load(Ordering::SeqCst)
}

/// Command runner returning queued outputs and recording every invocation
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Result<ProcessOutput, String>>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue stdout for the next call (exit code 0)
    pub fn then_stdout(self, stdout: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(ProcessOutput {
            exit_code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }));
        self
    }

    /// Queue a non-zero exit for the next call
    pub fn then_exit(self, code: i32, stderr: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(ProcessOutput {
            exit_code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }));
        self
    }

    /// Queue a spawn failure for the next call
    pub fn then_spawn_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput, MaintenanceError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(output)) => Ok(output),
            Some(Err(message)) => Err(MaintenanceError::ProcessSpawn {
                program: program.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, message),
            }),
            None => panic!("unexpected call to {} {:?}", program, args),
        }
    }
}

/// Restore point provider with a fixed exit code
pub struct FakeRestorePoints {
    pub exit_code: i32,
    pub stderr: String,
    pub spawn_error: bool,
    pub requests: Mutex<Vec<String>>,
}

impl FakeRestorePoints {
    pub fn succeeding() -> Self {
        Self {
            exit_code: 0,
            stderr: String::new(),
            spawn_error: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(exit_code: i32, stderr: &str) -> Self {
        Self {
            exit_code,
            stderr: stderr.to_string(),
            ..Self::succeeding()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            spawn_error: true,
            ..Self::succeeding()
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RestorePointProvider for FakeRestorePoints {
    async fn create(&self, description: &str) -> Result<ProcessOutput, MaintenanceError> {
        self.requests.lock().unwrap().push(description.to_string());
        if self.spawn_error {
            return Err(MaintenanceError::ProcessSpawn {
                program: "powershell.exe".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "powershell not found"),
            });
        }
        Ok(ProcessOutput {
            exit_code: Some(self.exit_code),
            stdout: String::new(),
            stderr: self.stderr.clone(),
        })
    }

    async fn list(&self) -> Result<Vec<RestorePointInfo>, MaintenanceError> {
        Ok(self
            .requests()
            .into_iter()
            .enumerate()
            .map(|(i, description)| RestorePointInfo {
                sequence_number: i as u32 + 1,
                creation_time: "20261017093000.000000-000".to_string(),
                description,
            })
            .collect())
    }
}

/// Real filesystem that refuses to delete entries whose file name contains
/// `locked`, and can refuse to enumerate specific directories
#[derive(Default)]
pub struct LockingFs {
    pub unreadable: Vec<PathBuf>,
}

impl LockingFs {
    fn is_locked(path: &Path) -> bool {
        path.file_name()
            .map(|n| n.to_string_lossy().contains("locked"))
            .unwrap_or(false)
    }

    fn in_use() -> io::Error {
        io::Error::new(
            io::ErrorKind::PermissionDenied,
            "The process cannot access the file because it is being used by another process.",
        )
    }
}

impl CleanupFs for LockingFs {
    fn dir_exists(&self, dir: &Path) -> bool {
        StdCleanupFs.dir_exists(dir)
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<(PathBuf, bool)>> {
        if self.unreadable.iter().any(|p| p == dir) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "Access is denied."));
        }
        StdCleanupFs.list(dir)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if Self::is_locked(path) {
            return Err(Self::in_use());
        }
        StdCleanupFs.remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        if Self::is_locked(path) {
            return Err(Self::in_use());
        }
        StdCleanupFs.remove_dir_all(path)
    }
}
