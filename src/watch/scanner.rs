// src/watch/scanner.rs

//! Blocking and async scan loops.
//!
//! Both loops read one line at a time, echo it to the sink with trailing
//! line terminators stripped, then feed it to [`WatchState::observe`]. They
//! stop as soon as the keyword has been seen often enough, when the line
//! budget runs out, or at end of stream, whichever comes first.

use std::ffi::OsStr;
use std::io::BufRead;
use std::process::Stdio;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::{HarnessError, Result};
use crate::watch::sink::LineSink;
use crate::watch::state::{ScanStep, WatchBudget, WatchState};

/// Final state of a finished scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub found: bool,
    pub state: WatchState,
}

/// Return `true` once `keyword` has appeared on `required_repeated_time`
/// lines within the first `line_limit * required_repeated_time` lines of
/// `reader`.
pub fn watch_for<R, S>(
    reader: R,
    keyword: &str,
    line_limit: usize,
    required_repeated_time: usize,
    sink: &mut S,
) -> Result<bool>
where
    R: BufRead,
    S: LineSink + ?Sized,
{
    let budget = WatchBudget::new(line_limit, required_repeated_time)?;
    scan_lines(reader, keyword, &budget, sink).map(|report| report.found)
}

/// Blocking scan returning the final counters as well as the verdict.
pub fn scan_lines<R, S>(
    mut reader: R,
    keyword: &str,
    budget: &WatchBudget,
    sink: &mut S,
) -> Result<ScanReport>
where
    R: BufRead,
    S: LineSink + ?Sized,
{
    check_keyword(keyword)?;

    let mut state = WatchState::new();
    let mut buf = Vec::new();

    while state.has_budget(budget) {
        buf.clear();
        if BufRead::read_until(&mut reader, b'\n', &mut buf)? == 0 {
            debug!(
                lines = state.lines_consumed(),
                matches = state.matches_seen(),
                "stream ended before keyword threshold"
            );
            break;
        }

        if feed_line(&mut state, budget, keyword, &buf, sink)? == ScanStep::Matched {
            return Ok(ScanReport { found: true, state });
        }
    }

    Ok(ScanReport {
        found: false,
        state,
    })
}

/// Async counterpart of [`watch_for`], e.g. for a Tokio child's stdout.
pub async fn watch_for_async<R, S>(
    reader: R,
    keyword: &str,
    line_limit: usize,
    required_repeated_time: usize,
    sink: &mut S,
) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    S: LineSink + ?Sized,
{
    let budget = WatchBudget::new(line_limit, required_repeated_time)?;
    scan_lines_async(reader, keyword, &budget, sink)
        .await
        .map(|report| report.found)
}

/// Async counterpart of [`scan_lines`].
pub async fn scan_lines_async<R, S>(
    mut reader: R,
    keyword: &str,
    budget: &WatchBudget,
    sink: &mut S,
) -> Result<ScanReport>
where
    R: AsyncBufRead + Unpin,
    S: LineSink + ?Sized,
{
    check_keyword(keyword)?;

    let mut state = WatchState::new();
    let mut buf = Vec::new();

    while state.has_budget(budget) {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            debug!(
                lines = state.lines_consumed(),
                matches = state.matches_seen(),
                "stream ended before keyword threshold"
            );
            break;
        }

        if feed_line(&mut state, budget, keyword, &buf, sink)? == ScanStep::Matched {
            return Ok(ScanReport { found: true, state });
        }
    }

    Ok(ScanReport {
        found: false,
        state,
    })
}

/// A child process whose stdout has been scanned.
///
/// The child is still running (or already exited) when this is returned;
/// waiting on or killing it is up to the caller. Any stdout produced after
/// the scan is drained in the background and logged at debug level.
#[derive(Debug)]
pub struct ChildWatch {
    pub found: bool,
    pub child: Child,
}

/// Spawn `program` with piped stdout and scan its output for `keyword`.
pub async fn watch_child<I, A, S>(
    program: impl AsRef<OsStr>,
    args: I,
    keyword: &str,
    budget: &WatchBudget,
    sink: &mut S,
) -> Result<ChildWatch>
where
    I: IntoIterator<Item = A>,
    A: AsRef<OsStr>,
    S: LineSink + ?Sized,
{
    let program = program.as_ref();
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().ok_or_else(|| {
        HarnessError::Other(anyhow::anyhow!("child stdout was not captured"))
    })?;

    info!(
        program = %program.to_string_lossy(),
        keyword,
        max_lines = budget.max_lines(),
        "watching child stdout"
    );

    let mut reader = BufReader::new(stdout);
    let report = scan_lines_async(&mut reader, keyword, budget, sink).await?;

    info!(
        found = report.found,
        lines = report.state.lines_consumed(),
        matches = report.state.matches_seen(),
        "child stdout scan finished"
    );

    // Keep the pipe open and empty so the child neither blocks on a full
    // buffer nor gets SIGPIPE on its next write.
    tokio::spawn(drain_stdout(reader));

    Ok(ChildWatch {
        found: report.found,
        child,
    })
}

/// Consecutive read errors tolerated before the drain gives up on the pipe.
const MAX_DRAIN_ERRORS: usize = 8;

/// Read and discard the rest of a child's output, logging it at debug.
///
/// Lines are decoded lossily like the scan itself, so binary output does not
/// end the drain early.
async fn drain_stdout<R>(mut reader: R)
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut errors = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                errors = 0;
                let decoded = String::from_utf8_lossy(&buf);
                debug!("stdout: {}", decoded.trim_end_matches(['\r', '\n']));
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => {
                errors += 1;
                warn!(error = %e, errors, "error reading child stdout");
                if errors >= MAX_DRAIN_ERRORS {
                    warn!("giving up on child stdout after repeated read errors");
                    break;
                }
            }
        }
    }

    debug!("child stdout drain ended");
}

fn feed_line<S>(
    state: &mut WatchState,
    budget: &WatchBudget,
    keyword: &str,
    raw: &[u8],
    sink: &mut S,
) -> Result<ScanStep>
where
    S: LineSink + ?Sized,
{
    let decoded = String::from_utf8_lossy(raw);
    let line = decoded.trim_end_matches(['\r', '\n']);
    sink.line(line)?;
    Ok(state.observe(budget, keyword, line))
}

fn check_keyword(keyword: &str) -> Result<()> {
    if keyword.is_empty() {
        return Err(HarnessError::invalid("keyword must not be empty"));
    }
    Ok(())
}
