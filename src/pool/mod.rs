// src/pool/mod.rs

//! Fan-out launcher for simulated node networks.
//!
//! - [`locate`] resolves an executable name against a search path.
//! - [`spawner`] abstracts "start this program and wait for it", with a
//!   Tokio-backed production implementation; tests swap in a fake.
//! - [`runner`] owns [`ProcessPool`], which starts N copies at once and
//!   waits for every one of them.

pub mod locate;
pub mod runner;
pub mod spawner;

pub use locate::{DEFAULT_EXTENSIONS, Locator, SearchPath};
pub use runner::{PoolSummary, ProcessPool};
pub use spawner::{LaunchFuture, ProcessSpawner, TokioSpawner, WorkerExit};
