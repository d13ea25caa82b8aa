use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nodeharness::errors::HarnessError;
use nodeharness::pool::{LaunchFuture, ProcessSpawner, WorkerExit};
use tokio::sync::Barrier;

/// Something the fake spawner observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnEvent {
    Started { worker: usize, program: PathBuf },
    Completed { worker: usize },
}

/// A spawner that never runs real processes. It:
/// - records a `Started` event when a launch begins
/// - optionally waits on a shared barrier and/or sleeps
/// - records `Completed` and reports the configured exit.
#[derive(Clone, Default)]
pub struct FakeSpawner {
    events: Arc<Mutex<Vec<SpawnEvent>>>,
    delay: Option<Duration>,
    barrier: Option<Arc<Barrier>>,
    failing: HashSet<usize>,
    erroring: HashSet<usize>,
}

impl FakeSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every launch sleeps this long before "exiting".
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every launch waits on this barrier before "exiting", so a batch can
    /// only finish if all of its launches are in flight at the same time.
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// These worker slots exit with code 1.
    pub fn failing(mut self, workers: impl IntoIterator<Item = usize>) -> Self {
        self.failing.extend(workers);
        self
    }

    /// These worker slots return a launch error instead of an exit.
    pub fn erroring(mut self, workers: impl IntoIterator<Item = usize>) -> Self {
        self.erroring.extend(workers);
        self
    }

    pub fn events(&self) -> Vec<SpawnEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn started(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SpawnEvent::Started { .. }))
            .count()
    }

    pub fn completed(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SpawnEvent::Completed { .. }))
            .count()
    }
}

impl ProcessSpawner for FakeSpawner {
    fn launch(&self, worker: usize, program: &Path) -> LaunchFuture<'_> {
        let program = program.to_path_buf();

        Box::pin(async move {
            self.events
                .lock()
                .unwrap()
                .push(SpawnEvent::Started { worker, program });

            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.events
                .lock()
                .unwrap()
                .push(SpawnEvent::Completed { worker });

            if self.erroring.contains(&worker) {
                return Err(HarnessError::from(std::io::Error::other(
                    "simulated launch failure",
                )));
            }

            Ok::<_, HarnessError>(if self.failing.contains(&worker) {
                WorkerExit::Exited(1)
            } else {
                WorkerExit::Exited(0)
            })
        })
    }
}
