//! Fixed-offset local calendar arithmetic on epoch-millisecond timestamps.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Room kept inside chrono's limits for offset shifts and range padding.
const CALENDAR_HEADROOM_MS: i64 = 4 * MS_PER_DAY;

/// True when `timestamp` stays on the calendar after day snapping and
/// padding at any supported UTC offset.
#[must_use]
pub fn is_supported_timestamp(timestamp: i64) -> bool {
    let min = DateTime::<Utc>::MIN_UTC.timestamp_millis() + CALENDAR_HEADROOM_MS;
    let max = DateTime::<Utc>::MAX_UTC.timestamp_millis() - CALENDAR_HEADROOM_MS;
    (min..=max).contains(&timestamp)
}

#[must_use]
pub fn offset_ms(utc_offset_hours: i32) -> i64 {
    i64::from(utc_offset_hours) * MS_PER_HOUR
}

/// Local midnight at or before `timestamp` for a fixed UTC offset.
#[must_use]
pub fn local_midnight(timestamp: i64, utc_offset_hours: i32) -> i64 {
    let offset = offset_ms(utc_offset_hours);
    timestamp
        .saturating_add(offset)
        .div_euclid(MS_PER_DAY)
        .saturating_mul(MS_PER_DAY)
        .saturating_sub(offset)
}

/// Local clock hour (0..=23) of `timestamp`.
#[must_use]
pub fn local_hour(timestamp: i64, utc_offset_hours: i32) -> i64 {
    timestamp
        .saturating_add(offset_ms(utc_offset_hours))
        .rem_euclid(MS_PER_DAY)
        / MS_PER_HOUR
}

/// Local minute of day (0..1440) of `timestamp`.
#[must_use]
pub fn local_minute_of_day(timestamp: i64, utc_offset_hours: i32) -> i64 {
    timestamp
        .saturating_add(offset_ms(utc_offset_hours))
        .rem_euclid(MS_PER_DAY)
        / MS_PER_MINUTE
}

/// Local calendar date of `timestamp`.
///
/// Returns `None` when the timestamp is outside chrono's representable range.
#[must_use]
pub fn local_date(timestamp: i64, utc_offset_hours: i32) -> Option<NaiveDate> {
    let shifted = timestamp.checked_add(offset_ms(utc_offset_hours))?;
    DateTime::from_timestamp_millis(shifted).map(|dt| dt.date_naive())
}

/// Epoch millis of local midnight starting `date`.
#[must_use]
pub fn date_midnight(date: NaiveDate, utc_offset_hours: i32) -> i64 {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_millis()
        .saturating_sub(offset_ms(utc_offset_hours))
}

#[must_use]
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
