// src/pool/spawner.rs

//! Pluggable process launching.
//!
//! [`ProcessPool`](super::ProcessPool) talks to a `ProcessSpawner` rather
//! than to `tokio::process` directly, so tests can count starts and exits
//! without running real binaries.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::errors::Result;

/// How a single worker ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerExit {
    /// The process exited with this code.
    Exited(i32),
    /// The process was terminated by a signal (no exit code).
    Signalled,
    /// The process could not be started, or its launcher failed.
    LaunchFailed(String),
}

impl WorkerExit {
    pub fn success(&self) -> bool {
        matches!(self, WorkerExit::Exited(0))
    }
}

impl From<ExitStatus> for WorkerExit {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => WorkerExit::Exited(code),
            None => WorkerExit::Signalled,
        }
    }
}

pub type LaunchFuture<'a> = Pin<Box<dyn Future<Output = Result<WorkerExit>> + Send + 'a>>;

/// Starts one program instance and resolves once it has exited.
pub trait ProcessSpawner: Send + Sync {
    /// Run `program` with no arguments. `worker` is the pool slot index.
    fn launch(&self, worker: usize, program: &Path) -> LaunchFuture<'_>;
}

/// Production spawner backed by `tokio::process::Command`.
///
/// Children inherit stdout/stderr unless `quiet` is set, in which case both
/// are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner {
    quiet: bool,
}

impl TokioSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl ProcessSpawner for TokioSpawner {
    fn launch(&self, worker: usize, program: &Path) -> LaunchFuture<'_> {
        Box::pin(run_child(worker, program.to_path_buf(), self.quiet))
    }
}

async fn run_child(worker: usize, program: PathBuf, quiet: bool) -> Result<WorkerExit> {
    let mut cmd = Command::new(&program);
    cmd.stdin(Stdio::null());
    if quiet {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
    }

    let mut child = cmd.spawn()?;
    debug!(worker, pid = ?child.id(), "worker process started");

    let status = child.wait().await?;
    Ok(WorkerExit::from(status))
}
