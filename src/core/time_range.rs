use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::calendar::{MS_PER_DAY, local_hour, local_midnight};
use crate::core::lookup::LocationLookup;
use crate::core::types::{Location, Step};

/// Local clock hour splitting a day into the "previous" and "next" halves
/// for range padding.
const HALF_DAY_HOUR: i64 = 12;

/// Global timeline window, snapped to local-day boundaries.
///
/// `{0, 0}` is the "no data" range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRange {
    pub min_timestamp: i64,
    pub max_timestamp: i64,
}

impl TimelineRange {
    #[must_use]
    pub const fn new(min_timestamp: i64, max_timestamp: i64) -> Self {
        Self {
            min_timestamp,
            max_timestamp,
        }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self::new(0, 0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.min_timestamp == 0 && self.max_timestamp == 0
    }

    #[must_use]
    pub const fn span_ms(self) -> i64 {
        self.max_timestamp.saturating_sub(self.min_timestamp)
    }

    /// Whole days covered by the window, at least one for a non-empty range.
    #[must_use]
    pub fn day_count(self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        let days = self.span_ms().saturating_add(MS_PER_DAY - 1).div_euclid(MS_PER_DAY);
        u32::try_from(days.max(1)).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub const fn contains(self, timestamp: i64) -> bool {
        timestamp >= self.min_timestamp && timestamp <= self.max_timestamp
    }
}

/// Resolves the padded timeline window for a step set.
#[must_use]
pub fn resolve_range(steps: &[Step], locations: &[Location]) -> TimelineRange {
    resolve_range_with(steps.iter(), &LocationLookup::new(locations))
}

/// Steps that can be laid out, stably sorted by start time.
///
/// Steps referencing unknown locations or carrying timestamps outside the
/// supported calendar are dropped with a warning. Layout and fit zoom both
/// resolve their range from this order so ties pick the same extreme step.
#[must_use]
pub fn layout_order<'s>(steps: &'s [Step], lookup: &LocationLookup<'_>) -> Vec<&'s Step> {
    let mut unknown_location = 0_usize;
    let mut out_of_calendar = 0_usize;
    let mut ordered: Vec<&Step> = Vec::with_capacity(steps.len());
    for step in steps {
        if !lookup.resolves(step) {
            unknown_location += 1;
        } else if !step.has_supported_timestamps() {
            out_of_calendar += 1;
        } else {
            ordered.push(step);
        }
    }
    if unknown_location > 0 {
        warn!(dropped = unknown_location, "excluding steps with unknown locations from layout");
    }
    if out_of_calendar > 0 {
        warn!(dropped = out_of_calendar, "excluding steps with out-of-calendar timestamps from layout");
    }
    ordered.sort_by_key(|step| step.start_timestamp);
    ordered
}

/// Same as [`resolve_range`] with a prebuilt location index.
///
/// Steps referencing unknown locations or out-of-calendar timestamps are
/// ignored.
#[must_use]
pub fn resolve_range_with<'s>(
    steps: impl IntoIterator<Item = &'s Step>,
    lookup: &LocationLookup<'_>,
) -> TimelineRange {
    let mut earliest: Option<&Step> = None;
    let mut latest: Option<&Step> = None;

    let usable = |step: &&Step| lookup.resolves(step) && step.has_supported_timestamps();
    for step in steps.into_iter().filter(usable) {
        if earliest.is_none_or(|current| step.start_timestamp < current.start_timestamp) {
            earliest = Some(step);
        }
        if latest.is_none_or(|current| step.finish_timestamp > current.finish_timestamp) {
            latest = Some(step);
        }
    }

    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return TimelineRange::empty();
    };
    let (Some(start_location), Some(finish_location)) = (
        lookup.get(earliest.start_location_id()),
        lookup.get(latest.finish_location_id()),
    ) else {
        return TimelineRange::empty();
    };

    let tz_start = start_location.utc_offset_hours();
    let mut min_timestamp = earliest.start_timestamp;
    if earliest.is_move() && local_hour(min_timestamp, tz_start) < HALF_DAY_HOUR {
        min_timestamp = min_timestamp.saturating_sub(MS_PER_DAY);
    }
    min_timestamp = local_midnight(min_timestamp, tz_start);

    let tz_finish = finish_location.utc_offset_hours();
    let mut max_timestamp =
        local_midnight(latest.finish_timestamp, tz_finish).saturating_add(MS_PER_DAY - 1);
    if latest.is_move() && local_hour(latest.finish_timestamp, tz_finish) >= HALF_DAY_HOUR {
        max_timestamp = max_timestamp.saturating_add(MS_PER_DAY);
    }

    TimelineRange::new(min_timestamp, max_timestamp)
}
