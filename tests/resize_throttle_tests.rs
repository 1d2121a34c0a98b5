use std::time::{Duration, Instant};

use itinerary_timeline::api::ResizeThrottle;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn first_resize_fires_immediately() {
    let mut throttle = ResizeThrottle::from_millis(100);
    let t0 = Instant::now();
    assert_eq!(throttle.on_resize(800.0, t0), Some(800.0));
    assert!(!throttle.has_pending());
    assert_eq!(throttle.next_deadline(), None);
}

#[test]
fn burst_inside_window_coalesces_to_latest_width() {
    let mut throttle = ResizeThrottle::from_millis(100);
    let t0 = Instant::now();
    assert_eq!(throttle.on_resize(800.0, t0), Some(800.0));
    assert_eq!(throttle.on_resize(810.0, t0 + ms(10)), None);
    assert_eq!(throttle.on_resize(820.0, t0 + ms(40)), None);
    assert_eq!(throttle.on_resize(830.0, t0 + ms(90)), None);
    assert!(throttle.has_pending());
    assert_eq!(throttle.next_deadline(), Some(t0 + ms(100)));

    assert_eq!(throttle.poll(t0 + ms(99)), None);
    assert_eq!(throttle.poll(t0 + ms(100)), Some(830.0));
    assert!(!throttle.has_pending());
    assert_eq!(throttle.poll(t0 + ms(500)), None);
}

#[test]
fn at_most_one_emission_per_window() {
    let mut throttle = ResizeThrottle::from_millis(100);
    let t0 = Instant::now();
    let mut emitted = 0;
    for step in 0..50u64 {
        let now = t0 + ms(step * 2);
        if throttle.on_resize(500.0 + step as f64, now).is_some() {
            emitted += 1;
        }
        if throttle.poll(now).is_some() {
            emitted += 1;
        }
    }
    // 0..98 ms falls into a single window.
    assert_eq!(emitted, 1);
    assert_eq!(throttle.poll(t0 + ms(100)), Some(549.0));
}

#[test]
fn resize_after_quiet_window_fires_again() {
    let mut throttle = ResizeThrottle::from_millis(100);
    let t0 = Instant::now();
    assert!(throttle.on_resize(600.0, t0).is_some());
    assert_eq!(throttle.on_resize(700.0, t0 + ms(250)), Some(700.0));
}

#[test]
fn invalid_widths_are_ignored() {
    let mut throttle = ResizeThrottle::new(ms(100));
    let t0 = Instant::now();
    assert_eq!(throttle.on_resize(f64::NAN, t0), None);
    assert_eq!(throttle.on_resize(-5.0, t0), None);
    assert!(!throttle.has_pending());
    assert_eq!(throttle.on_resize(640.0, t0), Some(640.0));
    assert_eq!(throttle.window(), ms(100));
}
