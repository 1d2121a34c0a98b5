//! Host-facing timeline API: layout building, zoom control and the engine.

mod engine;
mod grid_builder;
mod json_contract;
mod label_format;
mod layout;
mod layout_config;
mod resize_throttle;
mod zoom_controller;
mod zoom_preference;

pub use engine::{TimelineEngine, TimelineEngineConfig};
pub use grid_builder::build_layout;
pub use json_contract::{TIMELINE_LAYOUT_JSON_SCHEMA_V1, TimelineLayoutJsonContractV1};
pub use label_format::{clock_label, estimate_label_text_width_px, format_duration};
pub use layout::{DayCell, DaylightRect, MoveRectangle, TimelineLayout, Track};
pub use layout_config::{
    DEFAULT_ZOOM_INDEX, DEFAULT_ZOOM_LADDER_PX, DEFAULT_ZOOM_PREFERENCE_KEY, TimelineLayoutConfig,
};
pub use resize_throttle::ResizeThrottle;
pub use zoom_controller::{ZoomController, ZoomMode};
pub use zoom_preference::{
    MemoryPreferenceStore, PreferenceStore, ZoomPreference, load_zoom_preference,
    store_zoom_preference,
};
