use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use itinerary_timeline::api::{TimelineLayoutConfig, ZoomController};
use itinerary_timeline::core::calendar::{MS_PER_DAY, MS_PER_HOUR};
use itinerary_timeline::core::{Coordinates, Location, Step, calculate_daylight, resolve_range};
use itinerary_timeline::build_layout;
use std::hint::black_box;

// 2024-01-01T00:00:00Z
const BASE_UTC: i64 = 1_704_067_200_000;

fn world_tour(location_count: usize, legs: usize) -> (Vec<Location>, Vec<Step>) {
    let locations: Vec<Location> = (0..location_count)
        .map(|i| {
            let lat = -60.0 + 120.0 * i as f64 / location_count as f64;
            let lng = -180.0 + 360.0 * i as f64 / location_count as f64;
            let tz = (lng / 15.0).round() as i32;
            Location::new(format!("loc-{i}"), format!("City {i}"), Coordinates::new(lat, lng), tz)
        })
        .collect();

    let mut steps = Vec::with_capacity(legs * 2);
    let mut cursor = BASE_UTC;
    for leg in 0..legs {
        let here = leg % location_count;
        let next = (leg + 1) % location_count;
        let stay_end = cursor + 3 * MS_PER_DAY;
        steps.push(
            Step::stay(format!("stay-{leg}"), format!("loc-{here}"), cursor, stay_end)
                .expect("valid stay"),
        );
        let arrive = stay_end + 9 * MS_PER_HOUR;
        steps.push(
            Step::moving(
                format!("move-{leg}"),
                format!("loc-{here}"),
                format!("loc-{next}"),
                stay_end,
                arrive,
            )
            .expect("valid move"),
        );
        cursor = arrive;
    }
    (locations, steps)
}

fn bench_daylight_year(c: &mut Criterion) {
    let first = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");

    c.bench_function("daylight_365_days", |b| {
        b.iter(|| {
            for date in first.iter_days().take(365) {
                let _ = calculate_daylight(black_box(48.85), black_box(2.35), date, 1);
            }
        })
    });
}

fn bench_resolve_range(c: &mut Criterion) {
    let (locations, steps) = world_tour(12, 200);

    c.bench_function("resolve_range_400_steps", |b| {
        b.iter(|| {
            let _ = resolve_range(black_box(&steps), black_box(&locations));
        })
    });
}

fn bench_build_layout(c: &mut Criterion) {
    let (locations, steps) = world_tour(12, 60);
    let config = TimelineLayoutConfig::default();

    c.bench_function("build_layout_12_tracks_240_days", |b| {
        b.iter(|| {
            let _ = build_layout(black_box(&steps), black_box(&locations), 60.0, &config);
        })
    });
}

fn bench_zoom_fit(c: &mut Criterion) {
    let mut zoom = ZoomController::default();

    c.bench_function("zoom_fit_recompute", |b| {
        b.iter(|| {
            let _ = zoom.zoom_to_fit(black_box(1_920.0), black_box(240), 160.0);
        })
    });
}

criterion_group!(
    benches,
    bench_daylight_year,
    bench_resolve_range,
    bench_build_layout,
    bench_zoom_fit
);
criterion_main!(benches);
