use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::core::calendar::{MS_PER_DAY, date_midnight, format_iso_date, is_weekend, local_date};
use crate::core::{
    DaylightWindow, Location, LocationId, LocationLookup, Step, StepKind, TimelineRange,
    TimelineScale, calculate_daylight, layout_order, resolve_range_with,
};
use crate::render::{LabelPrimitive, Rect, TextHAlign, TextVAlign, to_position_style};

use super::label_format::{clock_label, format_duration};
use super::layout_config::{DEFAULT_ZOOM_INDEX, DEFAULT_ZOOM_LADDER_PX};
use super::{DayCell, DaylightRect, MoveRectangle, TimelineLayout, TimelineLayoutConfig, Track};

const MINUTES_PER_DAY: f64 = 1440.0;

/// Widest range, in local days, that gets day cells (about a century).
const MAX_LAYOUT_DAYS: u32 = 36_600;

/// Builds the full timeline layout from a step/location snapshot.
///
/// Steps are ordered by [`layout_order`], which drops steps referencing
/// unknown locations or out-of-calendar timestamps. An empty (or fully
/// dropped) step set, or a range wider than a century, yields
/// [`TimelineLayout::empty`]. A non-positive or non-finite `day_width_px`
/// falls back to the configured default rung.
#[must_use]
pub fn build_layout(
    steps: &[Step],
    locations: &[Location],
    day_width_px: f64,
    config: &TimelineLayoutConfig,
) -> TimelineLayout {
    let lookup = LocationLookup::new(locations);
    let day_width_px = sanitize_day_width(day_width_px, config);

    let sorted = layout_order(steps, &lookup);
    let range = resolve_range_with(sorted.iter().copied(), &lookup);
    if sorted.is_empty() || range.is_empty() {
        trace!("no steps to lay out");
        return TimelineLayout::empty(day_width_px);
    }
    let day_count = range.day_count();
    if day_count > MAX_LAYOUT_DAYS {
        warn!(day_count, max = MAX_LAYOUT_DAYS, "timeline range too wide to lay out");
        return TimelineLayout::empty(day_width_px);
    }

    let origin_px = finite_or_zero(config.location_label_width_px);
    let scale = match TimelineScale::new(range.min_timestamp, origin_px, day_width_px) {
        Ok(scale) => scale,
        Err(err) => {
            warn!(error = %err, "cannot build timeline scale");
            return TimelineLayout::empty(day_width_px);
        }
    };

    let track_order = referenced_locations(&sorted);
    let tracks = build_tracks(&track_order, &lookup, &sorted, range, scale, config);
    let moves = build_moves(&sorted, &lookup, &tracks, scale, config);

    let highest_track_top = tracks
        .values()
        .map(|track| track.track_top_px)
        .fold(f64::NEG_INFINITY, f64::max);
    let total_height_px = highest_track_top + config.track_height_px + config.layout_padding_top_px;
    let total_width_px = origin_px + scale.span_to_px(range.span_ms().saturating_add(1));

    debug!(
        steps = sorted.len(),
        tracks = tracks.len(),
        moves = moves.len(),
        day_width_px,
        "timeline layout built"
    );

    let layout = TimelineLayout {
        min_timestamp: range.min_timestamp,
        max_timestamp: range.max_timestamp,
        day_width_px,
        total_width_px,
        total_height_px,
        tracks,
        moves,
    };
    if let Err(err) = layout.validate() {
        warn!(error = %err, "discarding layout with undrawable geometry");
        return TimelineLayout::empty(day_width_px);
    }
    layout
}

/// Locations in order of first reference by the sorted steps.
fn referenced_locations<'a>(sorted: &[&'a Step]) -> IndexSet<&'a LocationId> {
    sorted
        .iter()
        .copied()
        .flat_map(Step::location_ids)
        .collect()
}

fn build_tracks(
    order: &IndexSet<&LocationId>,
    lookup: &LocationLookup<'_>,
    sorted: &[&Step],
    range: TimelineRange,
    scale: TimelineScale,
    config: &TimelineLayoutConfig,
) -> IndexMap<LocationId, Track> {
    let entries: Vec<(usize, &Location)> = order
        .iter()
        .enumerate()
        .filter_map(|(index, id)| lookup.get(id).map(|location| (index, location)))
        .collect();

    let build = |(index, location): &(usize, &Location)| {
        build_track(location, config.track_top_px(*index), sorted, range, scale, config)
    };

    #[cfg(feature = "parallel-layout")]
    let tracks: Vec<Track> = {
        use rayon::prelude::*;
        entries.par_iter().map(build).collect()
    };
    #[cfg(not(feature = "parallel-layout"))]
    let tracks: Vec<Track> = entries.iter().map(build).collect();

    tracks
        .into_iter()
        .map(|track| (track.location_id.clone(), track))
        .collect()
}

fn build_track(
    location: &Location,
    track_top_px: f64,
    sorted: &[&Step],
    range: TimelineRange,
    scale: TimelineScale,
    config: &TimelineLayoutConfig,
) -> Track {
    let name_label = LabelPrimitive::new(
        location.name.clone(),
        config.label_padding_px,
        track_top_px + config.track_height_px / 2.0,
        TextHAlign::Left,
        TextVAlign::Middle,
    );

    Track {
        location_id: location.id.clone(),
        location_name: location.name.clone(),
        track_top_px,
        name_label,
        day_cells: build_day_cells(location, track_top_px, sorted, range, scale, config),
    }
}

fn build_day_cells(
    location: &Location,
    track_top_px: f64,
    sorted: &[&Step],
    range: TimelineRange,
    scale: TimelineScale,
    config: &TimelineLayoutConfig,
) -> Vec<DayCell> {
    let tz = location.utc_offset_hours();
    let (Some(first), Some(last)) = (
        local_date(range.min_timestamp, tz),
        local_date(range.max_timestamp, tz),
    ) else {
        warn!(location_id = %location.id, "timeline range outside calendar bounds");
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| {
            let day_begin = date_midnight(date, tz);
            let day_end = day_begin.saturating_add(MS_PER_DAY - 1);
            let has_stay = sorted
                .iter()
                .any(|step| stay_overlaps(step, &location.id, day_begin, day_end));
            let has_move = sorted
                .iter()
                .any(|step| move_touches(step, &location.id, day_begin, day_end));

            let rect = Rect::new(
                scale.timestamp_to_px(day_begin),
                track_top_px,
                scale.day_width_px(),
                config.track_height_px,
            );
            let daylight = calculate_daylight(
                location.coordinates.lat,
                location.coordinates.lng,
                date,
                tz,
            );
            let daylight_rect = daylight_geometry(&daylight, rect);

            DayCell {
                date: format_iso_date(date),
                timestamp: day_begin,
                has_stay,
                has_move,
                is_empty: !has_stay && !has_move,
                is_weekend: is_weekend(date),
                rect,
                style: to_position_style(rect),
                daylight,
                daylight_rect,
            }
        })
        .collect()
}

fn stay_overlaps(step: &Step, location_id: &LocationId, day_begin: i64, day_end: i64) -> bool {
    match &step.kind {
        StepKind::Stay { location_id: at } => {
            at == location_id && step.start_timestamp <= day_end && step.finish_timestamp >= day_begin
        }
        StepKind::Move { .. } => false,
    }
}

/// A move touches a day when the endpoint at this location falls inside it.
fn move_touches(step: &Step, location_id: &LocationId, day_begin: i64, day_end: i64) -> bool {
    let within = |timestamp: i64| (day_begin..=day_end).contains(&timestamp);
    match &step.kind {
        StepKind::Move {
            start_location_id,
            finish_location_id,
        } => {
            (start_location_id == location_id && within(step.start_timestamp))
                || (finish_location_id == location_id && within(step.finish_timestamp))
        }
        StepKind::Stay { .. } => false,
    }
}

fn daylight_geometry(daylight: &DaylightWindow, cell: Rect) -> DaylightRect {
    if daylight.is_polar_night {
        return DaylightRect::Hidden;
    }
    if daylight.is_polar_day() {
        return DaylightRect::Span(cell);
    }
    let (Some(sunrise), Some(sunset)) = (daylight.sunrise_minutes(), daylight.sunset_minutes())
    else {
        return DaylightRect::Hidden;
    };

    let x_at = |minutes: u32| cell.left + cell.width * f64::from(minutes) / MINUTES_PER_DAY;
    if sunset >= sunrise {
        return DaylightRect::Span(Rect::from_edges(
            x_at(sunrise),
            cell.top,
            x_at(sunset),
            cell.bottom(),
        ));
    }

    DaylightRect::Wrapped {
        morning: Rect::from_edges(cell.left, cell.top, x_at(sunset), cell.bottom()),
        evening: Rect::from_edges(x_at(sunrise), cell.top, cell.right(), cell.bottom()),
    }
}

fn build_moves(
    sorted: &[&Step],
    lookup: &LocationLookup<'_>,
    tracks: &IndexMap<LocationId, Track>,
    scale: TimelineScale,
    config: &TimelineLayoutConfig,
) -> Vec<MoveRectangle> {
    sorted
        .iter()
        .filter_map(|step| {
            let StepKind::Move {
                start_location_id,
                finish_location_id,
            } = &step.kind
            else {
                return None;
            };
            let start_location = lookup.get(start_location_id)?;
            let finish_location = lookup.get(finish_location_id)?;
            let start_top = tracks.get(start_location_id)?.track_top_px;
            let finish_top = tracks.get(finish_location_id)?.track_top_px;

            let rect = Rect::from_edges(
                scale.timestamp_to_px(step.start_timestamp),
                start_top.min(finish_top),
                scale.timestamp_to_px(step.finish_timestamp),
                start_top.max(finish_top) + config.track_height_px,
            );

            let begin_time_label = LabelPrimitive::new(
                clock_label(
                    &step.start_date,
                    step.start_timestamp,
                    start_location.utc_offset_hours(),
                ),
                rect.left,
                rect.center_y(),
                TextHAlign::Right,
                TextVAlign::Middle,
            );
            let end_time_label = LabelPrimitive::new(
                clock_label(
                    &step.finish_date,
                    step.finish_timestamp,
                    finish_location.utc_offset_hours(),
                ),
                rect.right(),
                rect.center_y(),
                TextHAlign::Left,
                TextVAlign::Middle,
            );
            let duration_label = LabelPrimitive::new(
                format_duration(step.finish_timestamp.saturating_sub(step.start_timestamp)),
                rect.center_x(),
                rect.bottom(),
                TextHAlign::Center,
                TextVAlign::Top,
            );

            Some(MoveRectangle {
                step_id: step.id.clone(),
                start_location_id: start_location_id.clone(),
                finish_location_id: finish_location_id.clone(),
                rect,
                style: to_position_style(rect),
                begin_time_label,
                end_time_label,
                duration_label,
            })
        })
        .collect()
}

fn sanitize_day_width(day_width_px: f64, config: &TimelineLayoutConfig) -> f64 {
    if day_width_px.is_finite() && day_width_px > 0.0 {
        return day_width_px;
    }
    let fallback = config
        .zoom_ladder_px
        .get(config.default_zoom_index)
        .copied()
        .filter(|width| width.is_finite() && *width > 0.0)
        .unwrap_or(DEFAULT_ZOOM_LADDER_PX[DEFAULT_ZOOM_INDEX]);
    warn!(day_width_px, fallback, "invalid day width, using default rung");
    fallback
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> Rect {
        Rect::new(100.0, 10.0, 144.0, 36.0)
    }

    fn window(sunrise: &str, sunset: &str) -> DaylightWindow {
        DaylightWindow {
            sunrise_local: sunrise.to_owned(),
            sunset_local: sunset.to_owned(),
            is_polar_night: false,
        }
    }

    #[test]
    fn daylight_span_covers_sunrise_to_sunset_fraction() {
        let DaylightRect::Span(rect) = daylight_geometry(&window("06:00", "18:00"), cell()) else {
            panic!("expected span");
        };
        assert!((rect.left - 136.0).abs() < 1e-9);
        assert!((rect.width - 72.0).abs() < 1e-9);
        assert_eq!(rect.top, 10.0);
        assert_eq!(rect.height, 36.0);
    }

    #[test]
    fn polar_cases_hide_or_fill_cell() {
        assert_eq!(
            daylight_geometry(&DaylightWindow::polar_night(), cell()),
            DaylightRect::Hidden
        );
        assert_eq!(
            daylight_geometry(&DaylightWindow::polar_day(), cell()),
            DaylightRect::Span(cell())
        );
    }

    #[test]
    fn wrapped_daylight_touches_both_edges() {
        let DaylightRect::Wrapped { morning, evening } =
            daylight_geometry(&window("20:00", "04:00"), cell())
        else {
            panic!("expected wrapped daylight");
        };
        assert_eq!(morning.left, 100.0);
        assert!((morning.width - 24.0).abs() < 1e-9);
        assert!((evening.right() - 244.0).abs() < 1e-9);
        assert!((evening.width - 24.0).abs() < 1e-9);
    }

    #[test]
    fn move_touch_pairs_endpoint_with_location() {
        let step = Step::moving("m", "a", "b", 0, 10 * MS_PER_DAY).expect("valid move");
        let a = LocationId::new("a");
        let b = LocationId::new("b");
        assert!(move_touches(&step, &a, 0, MS_PER_DAY - 1));
        assert!(!move_touches(&step, &b, 0, MS_PER_DAY - 1));
        assert!(move_touches(&step, &b, 10 * MS_PER_DAY, 11 * MS_PER_DAY - 1));
    }
}
