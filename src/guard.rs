// src/guard.rs

//! Advisory deadlines for work that may never finish.
//!
//! The guard starts the work on its own thread (or Tokio task) and waits for
//! at most `deadline`. When the deadline passes first the caller gets its
//! fallback value back and the work is *abandoned*: it keeps running in the
//! background and its eventual result is dropped. Nothing is ever killed or
//! aborted, so a runaway task costs a thread until it finishes on its own.
//!
//! Two flavours are provided for each execution model:
//! - [`run_bounded`] / [`run_bounded_async`] return the task's value or the
//!   fallback. A panic inside the task also yields the fallback, which makes
//!   "timed out" and "failed" indistinguishable to the caller.
//! - [`run_bounded_outcome`] / [`run_bounded_async_outcome`] return a
//!   [`BoundedOutcome`] that keeps those three cases apart.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Result of a bounded run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundedOutcome<T> {
    /// The task finished within the deadline.
    Completed(T),
    /// The deadline elapsed first; the task was left running.
    TimedOut,
    /// The task panicked (or could not be started) before producing a value.
    Failed(String),
}

impl<T> BoundedOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, BoundedOutcome::Completed(_))
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, BoundedOutcome::TimedOut)
    }

    /// Collapse into the task's value, or `default` for any other outcome.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            BoundedOutcome::Completed(value) => value,
            BoundedOutcome::TimedOut | BoundedOutcome::Failed(_) => default,
        }
    }
}

/// Run `task` on a fresh thread and return its result, or `default` if it has
/// not finished after `deadline`.
pub fn run_bounded<F, T>(task: F, deadline: Duration, default: T) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    run_bounded_outcome(task, deadline).unwrap_or(default)
}

/// Like [`run_bounded`], but report how the run ended.
pub fn run_bounded_outcome<F, T>(task: F, deadline: Duration) -> BoundedOutcome<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    // Capacity 1 so the worker can always deposit its result and exit, even
    // after the caller stopped listening.
    let (tx, rx) = mpsc::sync_channel(1);

    let spawned = thread::Builder::new()
        .name("bounded-task".to_string())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task));
            let _ = tx.send(outcome);
        });

    if let Err(e) = spawned {
        warn!(error = %e, "failed to start bounded task thread");
        return BoundedOutcome::Failed(format!("failed to start task thread: {e}"));
    }

    match rx.recv_timeout(deadline) {
        Ok(Ok(value)) => BoundedOutcome::Completed(value),
        Ok(Err(payload)) => {
            let msg = panic_message(payload.as_ref());
            debug!(error = %msg, "bounded task panicked");
            BoundedOutcome::Failed(msg)
        }
        Err(RecvTimeoutError::Timeout) => {
            debug!(
                deadline_ms = deadline.as_millis() as u64,
                "deadline elapsed; abandoning bounded task"
            );
            BoundedOutcome::TimedOut
        }
        Err(RecvTimeoutError::Disconnected) => {
            BoundedOutcome::Failed("task thread exited without a result".to_string())
        }
    }
}

/// Async counterpart of [`run_bounded`] for use inside a Tokio runtime.
pub async fn run_bounded_async<F>(future: F, deadline: Duration, default: F::Output) -> F::Output
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    run_bounded_async_outcome(future, deadline)
        .await
        .unwrap_or(default)
}

/// Async counterpart of [`run_bounded_outcome`].
///
/// On expiry the spawned task's `JoinHandle` is dropped, which detaches the
/// task rather than aborting it.
pub async fn run_bounded_async_outcome<F>(future: F, deadline: Duration) -> BoundedOutcome<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let handle = tokio::spawn(future);

    match tokio::time::timeout(deadline, handle).await {
        Ok(Ok(value)) => BoundedOutcome::Completed(value),
        Ok(Err(join_err)) => {
            let msg = if join_err.is_panic() {
                panic_message(join_err.into_panic().as_ref())
            } else {
                join_err.to_string()
            };
            debug!(error = %msg, "bounded async task failed");
            BoundedOutcome::Failed(msg)
        }
        Err(_) => {
            debug!(
                deadline_ms = deadline.as_millis() as u64,
                "deadline elapsed; detaching bounded async task"
            );
            BoundedOutcome::TimedOut
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}
