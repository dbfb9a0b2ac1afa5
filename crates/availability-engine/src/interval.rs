//! Half-open interval overlap and instant arithmetic.
//!
//! Intervals are `[start, end)`. Two intervals overlap when
//! `start < other_end && end > other_start`, so an interval that ends exactly
//! where another begins does NOT overlap it.
//!
//! The arithmetic helpers saturate at the bounds of `DateTime<Utc>` rather than
//! panicking, so malformed input degrades into an empty or open-ended range.

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::Visit;

/// Whether `[start, end)` overlaps `[from, to)`.
///
/// An inverted query range (`from > to`) never matches a well-formed interval.
pub fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> bool {
    start < to && end > from
}

/// A query window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window of `days` starting at `start`.
    pub fn days_from(start: DateTime<Utc>, days: i64) -> Self {
        Self::new(start, plus_days(start, days))
    }

    /// Whether `at` falls inside `[start, end)`.
    pub fn contains_start(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn overlaps(&self, visit: &Visit) -> bool {
        overlaps(visit.start_time, visit.end_time, self.start, self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

fn shift(at: DateTime<Utc>, delta: Option<TimeDelta>) -> DateTime<Utc> {
    let saturated = |negative: bool| {
        if negative {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        }
    };
    match delta {
        Some(d) => at
            .checked_add_signed(d)
            .unwrap_or_else(|| saturated(d < TimeDelta::zero())),
        None => at,
    }
}

fn saturating_delta(delta: Option<TimeDelta>, amount: i64) -> Option<TimeDelta> {
    delta.or(Some(if amount < 0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    }))
}

pub fn plus_minutes(at: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    shift(at, saturating_delta(TimeDelta::try_minutes(minutes), minutes))
}

pub fn minus_minutes(at: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    plus_minutes(at, minutes.saturating_neg())
}

pub fn plus_hours(at: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    shift(at, saturating_delta(TimeDelta::try_hours(hours), hours))
}

pub fn minus_hours(at: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    plus_hours(at, hours.saturating_neg())
}

/// Adds `days` fixed 24-hour days (not calendar days).
pub fn plus_days(at: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    shift(at, saturating_delta(TimeDelta::try_days(days), days))
}
