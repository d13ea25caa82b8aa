// src/duration.rs

//! Parsing for the short duration strings accepted on the command line.

use std::time::Duration;

use crate::errors::{HarnessError, Result};

/// Parse a duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(HarnessError::invalid("empty duration string"));
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| HarnessError::invalid(format!("duration '{s}' missing unit suffix")))?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part.parse().map_err(|e| {
        HarnessError::invalid(format!("invalid duration number '{num_part}': {e}"))
    })?;

    let unit = unit_part.trim().to_lowercase();
    let secs = |mult: u64| {
        value
            .checked_mul(mult)
            .map(Duration::from_secs)
            .ok_or_else(|| HarnessError::invalid(format!("duration '{s}' is too large")))
    };

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => secs(1),
        "m" => secs(60),
        "h" => secs(60 * 60),
        _ => Err(HarnessError::invalid(format!(
            "unsupported duration unit '{unit}'; expected ms, s, m, or h"
        ))),
    }
}
