use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_ZOOM_LADDER_PX: [f64; 8] = [20.0, 30.0, 40.0, 60.0, 90.0, 120.0, 180.0, 240.0];
pub const DEFAULT_ZOOM_INDEX: usize = 3;
pub const DEFAULT_ZOOM_PREFERENCE_KEY: &str = "timeline-zoom";

fn default_location_label_width_px() -> f64 {
    160.0
}

fn default_track_height_px() -> f64 {
    36.0
}

fn default_track_gap_px() -> f64 {
    12.0
}

fn default_layout_padding_top_px() -> f64 {
    32.0
}

fn default_track_top_offset_px() -> f64 {
    4.0
}

fn default_label_font_size_px() -> f64 {
    13.0
}

fn default_label_padding_px() -> f64 {
    16.0
}

fn default_zoom_ladder_px() -> Vec<f64> {
    DEFAULT_ZOOM_LADDER_PX.to_vec()
}

fn default_zoom_index() -> usize {
    DEFAULT_ZOOM_INDEX
}

fn default_resize_throttle_ms() -> u64 {
    100
}

fn default_zoom_preference_key() -> String {
    DEFAULT_ZOOM_PREFERENCE_KEY.to_owned()
}

/// Geometry and zoom configuration for timeline layout.
///
/// Serializable so hosts can persist/load setup; every field falls back to
/// its default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayoutConfig {
    /// Width of the location-name column left of the first day.
    #[serde(default = "default_location_label_width_px")]
    pub location_label_width_px: f64,
    #[serde(default = "default_track_height_px")]
    pub track_height_px: f64,
    #[serde(default = "default_track_gap_px")]
    pub track_gap_px: f64,
    #[serde(default = "default_layout_padding_top_px")]
    pub layout_padding_top_px: f64,
    /// Constant upward shift applied to every track top.
    #[serde(default = "default_track_top_offset_px")]
    pub track_top_offset_px: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_label_padding_px")]
    pub label_padding_px: f64,
    /// Ascending discrete day widths.
    #[serde(default = "default_zoom_ladder_px")]
    pub zoom_ladder_px: Vec<f64>,
    /// Rung used when no prior discrete zoom exists.
    #[serde(default = "default_zoom_index")]
    pub default_zoom_index: usize,
    #[serde(default = "default_resize_throttle_ms")]
    pub resize_throttle_ms: u64,
    #[serde(default = "default_zoom_preference_key")]
    pub zoom_preference_key: String,
}

impl Default for TimelineLayoutConfig {
    fn default() -> Self {
        Self {
            location_label_width_px: default_location_label_width_px(),
            track_height_px: default_track_height_px(),
            track_gap_px: default_track_gap_px(),
            layout_padding_top_px: default_layout_padding_top_px(),
            track_top_offset_px: default_track_top_offset_px(),
            label_font_size_px: default_label_font_size_px(),
            label_padding_px: default_label_padding_px(),
            zoom_ladder_px: default_zoom_ladder_px(),
            default_zoom_index: default_zoom_index(),
            resize_throttle_ms: default_resize_throttle_ms(),
            zoom_preference_key: default_zoom_preference_key(),
        }
    }
}

impl TimelineLayoutConfig {
    #[must_use]
    pub fn with_location_label_width_px(mut self, width_px: f64) -> Self {
        self.location_label_width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_track_geometry(mut self, track_height_px: f64, track_gap_px: f64) -> Self {
        self.track_height_px = track_height_px;
        self.track_gap_px = track_gap_px;
        self
    }

    #[must_use]
    pub fn with_layout_padding_top_px(mut self, padding_px: f64) -> Self {
        self.layout_padding_top_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_track_top_offset_px(mut self, offset_px: f64) -> Self {
        self.track_top_offset_px = offset_px;
        self
    }

    #[must_use]
    pub fn with_zoom_ladder(mut self, ladder_px: Vec<f64>, default_index: usize) -> Self {
        self.zoom_ladder_px = ladder_px;
        self.default_zoom_index = default_index;
        self
    }

    #[must_use]
    pub fn with_resize_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.resize_throttle_ms = throttle_ms;
        self
    }

    #[must_use]
    pub fn with_zoom_preference_key(mut self, key: impl Into<String>) -> Self {
        self.zoom_preference_key = key.into();
        self
    }

    /// Y coordinate of the top edge of track `index`.
    #[must_use]
    pub fn track_top_px(&self, index: usize) -> f64 {
        self.layout_padding_top_px + index as f64 * (self.track_height_px + self.track_gap_px)
            - self.track_top_offset_px
    }

    pub fn validate(&self) -> TimelineResult<()> {
        for (field, value) in [
            ("location_label_width_px", self.location_label_width_px),
            ("track_gap_px", self.track_gap_px),
            ("layout_padding_top_px", self.layout_padding_top_px),
            ("label_padding_px", self.label_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "layout config `{field}` must be finite and >= 0"
                )));
            }
        }
        for (field, value) in [
            ("track_height_px", self.track_height_px),
            ("label_font_size_px", self.label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "layout config `{field}` must be finite and > 0"
                )));
            }
        }
        if !self.track_top_offset_px.is_finite() {
            return Err(TimelineError::InvalidData(
                "layout config `track_top_offset_px` must be finite".to_owned(),
            ));
        }
        if self.zoom_preference_key.is_empty() {
            return Err(TimelineError::InvalidData(
                "zoom preference key must not be empty".to_owned(),
            ));
        }
        validate_zoom_ladder(&self.zoom_ladder_px, self.default_zoom_index)
    }
}

pub(crate) fn validate_zoom_ladder(ladder_px: &[f64], default_index: usize) -> TimelineResult<()> {
    if ladder_px.is_empty() {
        return Err(TimelineError::InvalidZoomLadder(
            "ladder must contain at least one rung".to_owned(),
        ));
    }
    if ladder_px.iter().any(|rung| !rung.is_finite() || *rung <= 0.0) {
        return Err(TimelineError::InvalidZoomLadder(
            "rungs must be finite and > 0".to_owned(),
        ));
    }
    if ladder_px.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(TimelineError::InvalidZoomLadder(
            "rungs must be strictly ascending".to_owned(),
        ));
    }
    if default_index >= ladder_px.len() {
        return Err(TimelineError::InvalidZoomLadder(format!(
            "default index {default_index} is out of bounds for {} rungs",
            ladder_px.len()
        )));
    }
    Ok(())
}
