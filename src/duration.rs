//! Duration reduction and human-readable formatting
//!
//! A table cell summarises every passing execution of one test for one
//! version. [`Reduction`] picks how those durations collapse into a single
//! value and [`format_duration`] renders that value with a precision
//! proportional to its magnitude.

use std::fmt::Write;
use std::time::Duration;
use thiserror::Error;

/// Largest rounding tick; durations at or above it round to whole seconds.
const ROUND_BASE: Duration = Duration::from_secs(100);

/// Durations are rounded to 1/ROUND_PRECISION of their tick.
const ROUND_PRECISION: u128 = 100;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Text shown in place of a duration when a cell has nothing to report.
pub const NO_DATA_PLACEHOLDER: &str = "-";

/// A (test, version) cell has no executions, or at least one did not pass.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no passing executions")]
pub struct NoData;

/// How the durations of repeated executions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Total time of all executions.
    #[default]
    Sum,
    /// Mean time per execution, truncated to whole nanoseconds.
    Average,
    /// Median time per execution.
    Median,
}

impl Reduction {
    /// Select the reduction from the `ticks` and `median` switches.
    ///
    /// Median only applies in ticks mode; without ticks durations are summed.
    pub fn from_flags(ticks: bool, median: bool) -> Self {
        match (ticks, median) {
            (false, _) => Reduction::Sum,
            (true, false) => Reduction::Average,
            (true, true) => Reduction::Median,
        }
    }

    /// Reduce a set of durations, failing with [`NoData`] when it is empty.
    pub fn apply(&self, durations: &[Duration]) -> Result<Duration, NoData> {
        if durations.is_empty() {
            return Err(NoData);
        }

        let total: u128 = durations.iter().map(Duration::as_nanos).sum();
        let nanos = match self {
            Reduction::Sum => total,
            Reduction::Average => total / durations.len() as u128,
            Reduction::Median => {
                let mut values: Vec<u128> = durations.iter().map(Duration::as_nanos).collect();
                values.sort_unstable();
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    (values[mid - 1] + values[mid]) / 2
                } else {
                    values[mid]
                }
            }
        };

        Ok(from_nanos(nanos))
    }
}

fn from_nanos(nanos: u128) -> Duration {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}

/// Round a duration to a few significant digits and render it compactly.
///
/// The rounding step is 1/100th of the largest power-of-ten tick (at most
/// 100s) that does not exceed the duration, so `1.234567s` becomes `1.23s`
/// and `90.04s` becomes `1m30s`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    let mut scale = ROUND_BASE.as_nanos();
    while scale > nanos {
        scale /= 10;
    }

    compact(round_half_up(nanos, scale / ROUND_PRECISION))
}

fn round_half_up(value: u128, step: u128) -> u128 {
    if step == 0 {
        return value;
    }
    let rem = value % step;
    if rem + rem < step {
        value - rem
    } else {
        value + step - rem
    }
}

/// Render nanoseconds as `750ns`, `1.5µs`, `12.3ms`, `2.05s`, `1m40s` or `1h0m5s`.
fn compact(nanos: u128) -> String {
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_SEC {
        let (unit, digits) = if nanos < 1_000 {
            ("ns", 0)
        } else if nanos < 1_000_000 {
            ("µs", 3)
        } else {
            ("ms", 6)
        };
        return format!("{}{}", decimal(nanos, digits), unit);
    }

    let whole_secs = nanos / NANOS_PER_SEC;
    let hours = whole_secs / 3600;
    let minutes = (whole_secs / 60) % 60;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{}h{}m", hours, minutes);
    } else if minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    out.push_str(&decimal(nanos % (60 * NANOS_PER_SEC), 9));
    out.push('s');
    out
}

/// Format `value / 10^digits` with trailing fractional zeros trimmed.
fn decimal(value: u128, digits: u32) -> String {
    let divisor = 10u128.pow(digits);
    let whole = value / divisor;
    let frac = value % divisor;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
