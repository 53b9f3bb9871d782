//! Timeline time model.
//!
//! Timestamps are naive (zone-less) `chrono` date-times interpreted in one
//! cruise-local convention for the whole run.  Durations are planned in
//! fractional minutes and converted to `TimeDelta` at millisecond
//! resolution when added to a timestamp, so a long chain of additions does
//! not accumulate float drift in the timestamps themselves.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// A point on the cruise timeline.
pub type Timestamp = NaiveDateTime;

/// Convert fractional minutes to a `TimeDelta` (rounded to the millisecond).
///
/// Negative and NaN inputs clamp to zero: every planned span is ≥ 0.
/// Spans beyond `TimeDelta::MAX`, infinity included, saturate to it.
#[inline]
pub fn minutes(m: f64) -> TimeDelta {
    if m.is_nan() || m <= 0.0 {
        return TimeDelta::zero();
    }
    let ms = (m * 60_000.0).round();
    if ms >= i64::MAX as f64 {
        return TimeDelta::MAX;
    }
    TimeDelta::try_milliseconds(ms as i64).unwrap_or(TimeDelta::MAX)
}

/// `t` advanced by `m` minutes, or `None` past the last representable
/// timestamp.
#[inline]
pub fn advance(t: Timestamp, m: f64) -> Option<Timestamp> {
    t.checked_add_signed(minutes(m))
}

/// Convert a `TimeDelta` back to fractional minutes.
#[inline]
pub fn as_minutes(d: TimeDelta) -> f64 {
    d.num_milliseconds() as f64 / 60_000.0
}

/// Fractional hour of day in `[0, 24)`, e.g. 08:30 → 8.5.
pub fn hour_of_day(t: Timestamp) -> f64 {
    let secs = t.time().num_seconds_from_midnight() as f64
        + t.time().nanosecond() as f64 / 1e9;
    secs / 3_600.0
}

/// The timestamp at `hour:00` on the same calendar day as `t`.
///
/// `hour == 24` maps to midnight of the following day.
pub fn at_hour(t: Timestamp, hour: u32) -> Timestamp {
    let date = t.date();
    if hour >= 24 {
        let next = date.succ_opt().unwrap_or(date);
        return next.and_time(NaiveTime::MIN);
    }
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
}

/// Build a timestamp from a calendar date and `HH:MM` wall time.
///
/// Returns `None` if any component is out of range.
pub fn from_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Timestamp> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}
