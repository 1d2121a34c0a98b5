//! itinerary-timeline: multi-timezone travel timeline layout and daylight engine.
//!
//! Converts locations (each with its own UTC offset and coordinates) and
//! ordered travel steps into renderer-agnostic track geometry, and computes
//! per-location, per-day sunrise/sunset windows.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig, TimelineLayout, build_layout};
pub use crate::core::{DaylightWindow, Location, Step, calculate_daylight, resolve_range};
pub use error::{TimelineError, TimelineResult};
