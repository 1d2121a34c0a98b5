use chrono::NaiveDate;
use itinerary_timeline::core::{DaylightWindow, POLAR_NIGHT_SENTINEL, calculate_daylight};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn minutes(clock: &str) -> i64 {
    let (h, m) = clock.split_once(':').expect("clock text");
    h.parse::<i64>().expect("hours") * 60 + m.parse::<i64>().expect("minutes")
}

fn assert_clock_near(actual: &str, expected: &str, tolerance_min: i64) {
    let diff = (minutes(actual) - minutes(expected)).rem_euclid(1440);
    let diff = diff.min(1440 - diff);
    assert!(
        diff <= tolerance_min,
        "expected {actual} within {tolerance_min} min of {expected}"
    );
}

#[test]
fn north_pole_summer_is_polar_day() {
    let window = calculate_daylight(90.0, 0.0, date(2024, 6, 21), 0);
    assert_eq!(window.sunrise_local, "00:00");
    assert_eq!(window.sunset_local, "23:59");
    assert!(!window.is_polar_night);
    assert!(window.is_polar_day());
}

#[test]
fn south_pole_june_is_polar_night() {
    let window = calculate_daylight(-90.0, 0.0, date(2024, 6, 21), 0);
    assert_eq!(window, DaylightWindow::polar_night());
    assert_eq!(window.sunrise_local, POLAR_NIGHT_SENTINEL);
    assert_eq!(window.sunset_local, POLAR_NIGHT_SENTINEL);
    assert!(window.is_polar_night);
    assert_eq!(window.sunrise_minutes(), None);
}

#[test]
fn arctic_city_switches_between_polar_night_and_day() {
    // Tromsø
    let winter = calculate_daylight(69.65, 18.96, date(2024, 12, 21), 1);
    let summer = calculate_daylight(69.65, 18.96, date(2024, 6, 21), 1);
    assert!(winter.is_polar_night);
    assert!(summer.is_polar_day());
}

#[test]
fn paris_early_june_daylight() {
    let window = calculate_daylight(48.85, 2.35, date(2024, 6, 1), 1);
    assert!(!window.is_polar_night);
    assert_clock_near(&window.sunrise_local, "04:55", 2);
    assert_clock_near(&window.sunset_local, "20:37", 2);

    // One hour later in summer time.
    let summer_time = calculate_daylight(48.85, 2.35, date(2024, 6, 1), 2);
    assert_clock_near(&summer_time.sunrise_local, "05:55", 2);
    assert_clock_near(&summer_time.sunset_local, "21:37", 2);
}

#[test]
fn new_york_winter_daylight() {
    let window = calculate_daylight(40.71, -74.0, date(2024, 1, 15), -5);
    assert_clock_near(&window.sunrise_local, "07:12", 2);
    assert_clock_near(&window.sunset_local, "16:36", 2);
}

#[test]
fn equator_equinox_day_is_twelve_hours() {
    for lng in [-120.0, 0.0, 139.69] {
        let window = calculate_daylight(0.0, lng, date(2024, 3, 20), 0);
        let sunrise = window.sunrise_minutes().expect("sunrise") as i64;
        let sunset = window.sunset_minutes().expect("sunset") as i64;
        let day_length = (sunset - sunrise).rem_euclid(1440);
        assert!((day_length - 720).abs() <= 120, "day length {day_length} at {lng}");
    }
}

#[test]
fn offset_wraps_local_clock_past_midnight() {
    // Solar times far from the nominal offset wrap around local midnight.
    let window = calculate_daylight(0.0, 139.69, date(2024, 3, 20), 0);
    assert_clock_near(&window.sunrise_local, "20:33", 2);
    assert_clock_near(&window.sunset_local, "08:33", 2);
}

#[test]
fn out_of_range_coordinates_are_clamped() {
    let clamped = calculate_daylight(120.0, 400.0, date(2024, 6, 21), 0);
    let edge = calculate_daylight(90.0, 180.0, date(2024, 6, 21), 0);
    assert_eq!(clamped, edge);

    let nan = calculate_daylight(f64::NAN, f64::INFINITY, date(2024, 6, 21), 0);
    let origin = calculate_daylight(0.0, 0.0, date(2024, 6, 21), 0);
    assert_eq!(nan, origin);
}

#[test]
fn repeated_calls_are_identical() {
    let a = calculate_daylight(35.68, 139.69, date(2024, 6, 2), 9);
    let b = calculate_daylight(35.68, 139.69, date(2024, 6, 2), 9);
    assert_eq!(a, b);
    assert_clock_near(&a.sunrise_local, "04:28", 2);
    assert_clock_near(&a.sunset_local, "18:45", 2);
}
