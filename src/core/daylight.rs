use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Clock text used for sunrise/sunset when the sun never rises.
pub const POLAR_NIGHT_SENTINEL: &str = "--:--";
pub const POLAR_DAY_SUNRISE: &str = "00:00";
pub const POLAR_DAY_SUNSET: &str = "23:59";

const MINUTES_PER_DAY: f64 = 1440.0;
const J2000: f64 = 2_451_545.0;
const OBLIQUITY_DEG: f64 = 23.44;

/// Local sunrise/sunset for one location on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaylightWindow {
    pub sunrise_local: String,
    pub sunset_local: String,
    pub is_polar_night: bool,
}

impl DaylightWindow {
    #[must_use]
    pub fn polar_night() -> Self {
        Self {
            sunrise_local: POLAR_NIGHT_SENTINEL.to_owned(),
            sunset_local: POLAR_NIGHT_SENTINEL.to_owned(),
            is_polar_night: true,
        }
    }

    #[must_use]
    pub fn polar_day() -> Self {
        Self {
            sunrise_local: POLAR_DAY_SUNRISE.to_owned(),
            sunset_local: POLAR_DAY_SUNSET.to_owned(),
            is_polar_night: false,
        }
    }

    #[must_use]
    pub fn is_polar_day(&self) -> bool {
        !self.is_polar_night
            && self.sunrise_local == POLAR_DAY_SUNRISE
            && self.sunset_local == POLAR_DAY_SUNSET
    }

    /// Sunrise as local minute of day, `None` during polar night.
    #[must_use]
    pub fn sunrise_minutes(&self) -> Option<u32> {
        parse_clock_minutes(&self.sunrise_local)
    }

    /// Sunset as local minute of day, `None` during polar night.
    #[must_use]
    pub fn sunset_minutes(&self) -> Option<u32> {
        parse_clock_minutes(&self.sunset_local)
    }
}

/// Simplified solar-position sunrise/sunset for a calendar date.
///
/// Latitude is clamped to `[-90, 90]` and longitude to `[-180, 180]`;
/// non-finite coordinates are treated as `0.0`. The result depends only on
/// the arguments.
#[must_use]
pub fn calculate_daylight(lat: f64, lng: f64, date: NaiveDate, utc_offset_hours: i32) -> DaylightWindow {
    let lat = sanitize_coordinate(lat, 90.0, "latitude");
    let lng = sanitize_coordinate(lng, 180.0, "longitude");

    let n = julian_day(date) - J2000;
    let mean_longitude = normalize_degrees(280.460 + 0.985_647_4 * n);
    let mean_anomaly = normalize_degrees(357.528 + 0.985_600_3 * n).to_radians();
    let ecliptic_longitude = normalize_degrees(
        mean_longitude + 1.915 * mean_anomaly.sin() + 0.020 * (2.0 * mean_anomaly).sin(),
    );

    let declination = (OBLIQUITY_DEG.to_radians().sin() * ecliptic_longitude.to_radians().sin()).asin();
    let cos_hour_angle = -lat.to_radians().tan() * declination.tan();

    if cos_hour_angle > 1.0 {
        return DaylightWindow::polar_night();
    }
    if cos_hour_angle < -1.0 {
        return DaylightWindow::polar_day();
    }
    let hour_angle = cos_hour_angle.acos().to_degrees();

    // Both longitudes are reduced mod 360, so their difference is wrapped
    // back to (-180, 180] before scaling to minutes.
    let equation_of_time = 4.0 * wrap_degrees(mean_longitude - 0.005_718_3 - ecliptic_longitude);
    let longitude_correction = -lng * 4.0;

    let solar_noon_utc = 720.0 + equation_of_time + longitude_correction;
    let sunrise_utc = solar_noon_utc - 4.0 * hour_angle;
    let sunset_utc = solar_noon_utc + 4.0 * hour_angle;

    let offset_minutes = f64::from(utc_offset_hours) * 60.0;
    DaylightWindow {
        sunrise_local: format_clock(sunrise_utc + offset_minutes),
        sunset_local: format_clock(sunset_utc + offset_minutes),
        is_polar_night: false,
    }
}

/// Julian day at 0h UT using the Gregorian calendar correction.
fn julian_day(date: NaiveDate) -> f64 {
    let (mut year, mut month) = (date.year(), date.month() as i32);
    if month <= 2 {
        year -= 1;
        month += 12;
    }
    let century = (f64::from(year) / 100.0).floor();
    let gregorian_correction = 2.0 - century + (century / 4.0).floor();

    (365.25 * f64::from(year + 4716)).floor()
        + (30.6001 * f64::from(month + 1)).floor()
        + f64::from(date.day())
        + gregorian_correction
        - 1524.5
}

fn sanitize_coordinate(value: f64, limit: f64, field_name: &str) -> f64 {
    if !value.is_finite() {
        warn!(field = field_name, value, "non-finite coordinate treated as 0");
        return 0.0;
    }
    if value.abs() > limit {
        warn!(field = field_name, value, limit, "coordinate clamped to valid range");
    }
    value.clamp(-limit, limit)
}

fn normalize_degrees(value: f64) -> f64 {
    value.rem_euclid(360.0)
}

fn wrap_degrees(value: f64) -> f64 {
    let wrapped = normalize_degrees(value);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

fn format_clock(minutes: f64) -> String {
    let local = minutes.rem_euclid(MINUTES_PER_DAY);
    let total = (local.floor() as u32).min(1439);
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn parse_clock_minutes(text: &str) -> Option<u32> {
    let (hours, minutes) = text.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    (hours < 24 && minutes < 60).then_some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn julian_day_matches_reference_epochs() {
        assert_eq!(julian_day(date(2000, 1, 1)), 2_451_544.5);
        assert_eq!(julian_day(date(2024, 6, 1)), 2_460_462.5);
    }

    #[test]
    fn clock_formatting_wraps_negative_minutes() {
        assert_eq!(format_clock(-30.0), "23:30");
        assert_eq!(format_clock(1440.0 + 61.9), "01:01");
        assert_eq!(format_clock(1439.99), "23:59");
    }

    #[test]
    fn sentinel_does_not_parse_as_clock() {
        assert_eq!(parse_clock_minutes(POLAR_NIGHT_SENTINEL), None);
        assert_eq!(parse_clock_minutes("05:45"), Some(345));
    }

    #[test]
    fn wrap_degrees_stays_in_half_open_range() {
        assert!((wrap_degrees(358.0) + 2.0).abs() < 1e-12);
        assert!((wrap_degrees(-358.0) - 2.0).abs() < 1e-12);
    }
}
