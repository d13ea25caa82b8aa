// src/watch/state.rs

use crate::errors::{HarnessError, Result};

/// How many lines a scan may read and how many matches it needs.
///
/// The line budget is `line_limit * required_repeated_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchBudget {
    line_limit: usize,
    required_repeated_time: usize,
    max_lines: usize,
}

impl WatchBudget {
    pub fn new(line_limit: usize, required_repeated_time: usize) -> Result<Self> {
        if required_repeated_time == 0 {
            return Err(HarnessError::invalid(
                "required_repeated_time must be at least 1",
            ));
        }
        if line_limit == 0 {
            return Err(HarnessError::invalid("line_limit must be at least 1"));
        }
        let max_lines = line_limit
            .checked_mul(required_repeated_time)
            .ok_or_else(|| {
                HarnessError::invalid(format!(
                    "line budget overflows: {line_limit} * {required_repeated_time}"
                ))
            })?;

        Ok(Self {
            line_limit,
            required_repeated_time,
            max_lines,
        })
    }

    pub fn line_limit(&self) -> usize {
        self.line_limit
    }

    pub fn required_repeated_time(&self) -> usize {
        self.required_repeated_time
    }

    /// Maximum number of lines a scan will consume.
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }
}

/// Result of feeding one line into a [`WatchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    /// Keep reading.
    Continue,
    /// The required number of matches has been seen.
    Matched,
    /// The line budget is used up without reaching the threshold.
    Exhausted,
}

/// Running counters for one scan.
///
/// Both counters only grow, and never pass the budget they are checked
/// against: `lines_consumed <= max_lines`, `matches_seen <= required`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchState {
    lines_consumed: usize,
    matches_seen: usize,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines_consumed(&self) -> usize {
        self.lines_consumed
    }

    pub fn matches_seen(&self) -> usize {
        self.matches_seen
    }

    pub fn is_matched(&self, budget: &WatchBudget) -> bool {
        self.matches_seen >= budget.required_repeated_time
    }

    /// Whether another line may be read under `budget`.
    pub fn has_budget(&self, budget: &WatchBudget) -> bool {
        !self.is_matched(budget) && self.lines_consumed < budget.max_lines
    }

    /// Account for one consumed line.
    ///
    /// A line counts as a single match no matter how often `keyword` occurs
    /// in it. Once the scan has matched or run out of budget, further lines
    /// are ignored and the terminal step is repeated.
    pub fn observe(&mut self, budget: &WatchBudget, keyword: &str, line: &str) -> ScanStep {
        if self.is_matched(budget) {
            return ScanStep::Matched;
        }
        if self.lines_consumed >= budget.max_lines {
            return ScanStep::Exhausted;
        }

        self.lines_consumed += 1;
        if line.contains(keyword) {
            self.matches_seen += 1;
            if self.is_matched(budget) {
                return ScanStep::Matched;
            }
        }

        if self.lines_consumed >= budget.max_lines {
            ScanStep::Exhausted
        } else {
            ScanStep::Continue
        }
    }
}
