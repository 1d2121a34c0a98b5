pub mod calendar;
pub mod daylight;
pub mod lookup;
pub mod scale;
pub mod time_range;
pub mod types;

pub use daylight::{DaylightWindow, POLAR_NIGHT_SENTINEL, calculate_daylight};
pub use lookup::LocationLookup;
pub use scale::TimelineScale;
pub use time_range::{TimelineRange, layout_order, resolve_range, resolve_range_with};
pub use types::{Coordinates, Location, LocationId, Step, StepId, StepKind};
