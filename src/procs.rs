// src/procs.rs

//! Counting running processes by name, e.g. to confirm a launched node
//! network is up.

use sysinfo::{ProcessRefreshKind, RefreshKind, System};
use tracing::debug;

use crate::errors::{HarnessError, Result};

/// Number of running processes whose name contains `pattern`.
///
/// Matching is a case-sensitive substring check on the process name as the
/// OS reports it (on Linux that name is truncated to 15 bytes).
pub fn count_matching(pattern: &str) -> Result<usize> {
    check_pattern(pattern)?;

    let sys = System::new_with_specifics(
        RefreshKind::new().with_processes(ProcessRefreshKind::new()),
    );
    let names = sys
        .processes()
        .values()
        .map(|process| process.name().to_string_lossy().into_owned());

    let count = count_in(names, pattern)?;
    debug!(pattern, count, "counted matching processes");
    Ok(count)
}

/// Count how many of `names` contain `pattern`.
pub fn count_in<I, S>(names: I, pattern: &str) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    check_pattern(pattern)?;
    Ok(names
        .into_iter()
        .filter(|name| name.as_ref().contains(pattern))
        .count())
}

fn check_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(HarnessError::invalid("process name pattern must not be empty"));
    }
    Ok(())
}
