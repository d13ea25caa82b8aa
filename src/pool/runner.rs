// src/pool/runner.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::errors::{HarnessError, Result};
use crate::pool::locate::Locator;
use crate::pool::spawner::{ProcessSpawner, TokioSpawner, WorkerExit};

/// How every worker of one fan-out ended, indexed by worker slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSummary {
    pub program: PathBuf,
    pub workers: Vec<WorkerExit>,
}

impl PoolSummary {
    pub fn launched(&self) -> usize {
        self.workers.len()
    }

    pub fn succeeded(&self) -> usize {
        self.workers.iter().filter(|w| w.success()).count()
    }

    pub fn failed(&self) -> usize {
        self.launched() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Launches `count` identical copies of a program at once and waits for all
/// of them.
///
/// There is no queueing: the pool is exactly as wide as the batch. A child
/// that fails or exits non-zero does not affect its siblings, and the pool
/// never turns a child failure into an error; callers inspect the returned
/// [`PoolSummary`] if they care.
pub struct ProcessPool {
    locator: Locator,
    spawner: Arc<dyn ProcessSpawner>,
}

impl ProcessPool {
    pub fn new(locator: Locator, spawner: Arc<dyn ProcessSpawner>) -> Self {
        Self { locator, spawner }
    }

    /// Pool that launches real processes through [`TokioSpawner`].
    pub fn with_tokio(locator: Locator) -> Self {
        Self::new(locator, Arc::new(TokioSpawner::new()))
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Resolve `name` and run `count` copies of it.
    ///
    /// Fails with `NotFound` before launching anything if `name` cannot be
    /// resolved.
    pub async fn run_all(&self, name: &str, count: usize) -> Result<PoolSummary> {
        check_count(count)?;
        let program = self.locator.resolve(name)?;
        self.run_path(&program, count).await
    }

    /// Run `count` copies of an already-resolved program.
    pub async fn run_path(&self, program: &Path, count: usize) -> Result<PoolSummary> {
        check_count(count)?;

        info!(
            program = %program.display(),
            count,
            "launching worker processes"
        );

        let mut set = JoinSet::new();
        let mut slots = HashMap::with_capacity(count);

        for worker in 0..count {
            let spawner = Arc::clone(&self.spawner);
            let program = program.to_path_buf();

            let span = info_span!("worker", worker, count);
            let handle = set.spawn(
                async move {
                    debug!("launching worker");
                    spawner.launch(worker, &program).await
                }
                .instrument(span),
            );
            slots.insert(handle.id(), worker);
        }

        let mut exits: Vec<Option<WorkerExit>> = vec![None; count];

        while let Some(joined) = set.join_next_with_id().await {
            let (worker, exit) = match joined {
                Ok((id, Ok(exit))) => (slots[&id], exit),
                Ok((id, Err(err))) => {
                    error!(worker = slots[&id], error = %err, "worker launch failed");
                    (slots[&id], WorkerExit::LaunchFailed(err.to_string()))
                }
                Err(join_err) => {
                    let worker = slots[&join_err.id()];
                    error!(worker, error = %join_err, "worker task did not complete");
                    (worker, WorkerExit::LaunchFailed(join_err.to_string()))
                }
            };

            match &exit {
                WorkerExit::Exited(code) if *code == 0 => {
                    debug!(worker, exit_code = code, "worker exited")
                }
                WorkerExit::Exited(code) => {
                    warn!(worker, exit_code = code, "worker exited with failure")
                }
                WorkerExit::Signalled => warn!(worker, "worker terminated by signal"),
                WorkerExit::LaunchFailed(_) => {}
            }

            exits[worker] = Some(exit);
        }

        let workers: Vec<WorkerExit> = exits
            .into_iter()
            .map(|exit| {
                exit.unwrap_or_else(|| WorkerExit::LaunchFailed("worker result missing".to_string()))
            })
            .collect();

        let summary = PoolSummary {
            program: program.to_path_buf(),
            workers,
        };

        info!(
            program = %summary.program.display(),
            launched = summary.launched(),
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "all worker processes finished"
        );

        Ok(summary)
    }
}

fn check_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(HarnessError::invalid("worker count must be at least 1"));
    }
    Ok(())
}
