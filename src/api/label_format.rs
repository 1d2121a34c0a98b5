use crate::core::calendar::{MS_PER_HOUR, MS_PER_MINUTE, local_minute_of_day};

/// Local `HH:MM` clock text for a step endpoint.
///
/// Taken from the ISO date string (`YYYY-MM-DDTHH:MM...`) when it carries a
/// time; otherwise derived from the timestamp and the endpoint's offset.
#[must_use]
pub fn clock_label(iso_date: &str, timestamp: i64, utc_offset_hours: i32) -> String {
    if let Some(clock) = clock_from_iso(iso_date) {
        return clock.to_owned();
    }
    let minute_of_day = local_minute_of_day(timestamp, utc_offset_hours);
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

fn clock_from_iso(iso_date: &str) -> Option<&str> {
    let (_, time) = iso_date.split_once('T')?;
    let clock = time.get(..5)?;
    let bytes = clock.as_bytes();
    let well_formed = bytes[2] == b':'
        && [bytes[0], bytes[1], bytes[3], bytes[4]]
            .iter()
            .all(u8::is_ascii_digit);
    well_formed.then_some(clock)
}

/// Narrow hours+minutes duration text, e.g. `12h`, `1h 30m`, `45m`.
///
/// Negative durations render as `0m`; seconds are truncated.
#[must_use]
pub fn format_duration(duration_ms: i64) -> String {
    let duration_ms = duration_ms.max(0);
    let hours = duration_ms / MS_PER_HOUR;
    let minutes = (duration_ms % MS_PER_HOUR) / MS_PER_MINUTE;

    match (hours, minutes) {
        (0, minutes) => format!("{minutes}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, minutes) => format!("{hours}h {minutes}m"),
    }
}

/// Backend-independent text width estimate in pixels.
#[must_use]
pub fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | '\'' => 0.34,
            '-' | '(' | ')' => 0.42,
            ' ' => 0.33,
            'A'..='Z' => 0.68,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_prefers_iso_time() {
        assert_eq!(clock_label("2024-06-01T09:00:00+01:00", 0, 0), "09:00");
        assert_eq!(clock_label("2024-06-01T23:45", 0, 0), "23:45");
    }

    #[test]
    fn clock_falls_back_to_timestamp() {
        // 1970-01-01T08:30Z at UTC+1
        let ts = 8 * MS_PER_HOUR + 30 * MS_PER_MINUTE;
        assert_eq!(clock_label("", ts, 1), "09:30");
        assert_eq!(clock_label("2024-06-01", ts, 1), "09:30");
        assert_eq!(clock_label("2024-06-01Tab:cd", ts, -9), "23:30");
    }

    #[test]
    fn duration_uses_narrow_units() {
        assert_eq!(format_duration(12 * MS_PER_HOUR), "12h");
        assert_eq!(format_duration(90 * MS_PER_MINUTE), "1h 30m");
        assert_eq!(format_duration(45 * MS_PER_MINUTE + 59_000), "45m");
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(-5), "0m");
        assert_eq!(format_duration(50 * MS_PER_HOUR), "50h");
    }

    #[test]
    fn width_estimate_never_below_font_size() {
        assert_eq!(estimate_label_text_width_px("", 13.0), 13.0);
        assert!(estimate_label_text_width_px("Paris", 13.0) > 13.0);
    }
}
