// src/watch/mod.rs

//! Keyword watching over a process's line-oriented output.
//!
//! - [`state`] holds the pure scan bookkeeping (`WatchBudget`, `WatchState`).
//! - [`sink`] defines where consumed lines are echoed.
//! - [`scanner`] drives the state over a blocking `BufRead`, a Tokio
//!   `AsyncBufRead`, or the stdout of a freshly spawned child.

pub mod scanner;
pub mod sink;
pub mod state;

pub use scanner::{
    ChildWatch, ScanReport, scan_lines, scan_lines_async, watch_child, watch_for, watch_for_async,
};
pub use sink::{LineSink, NullSink, TracingSink, WriterSink};
pub use state::{ScanStep, WatchBudget, WatchState};
