use serde::{Deserialize, Serialize};

use crate::core::calendar::MS_PER_DAY;
use crate::error::{TimelineError, TimelineResult};

/// Global linear timestamp-to-pixel mapping shared by every track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineScale {
    origin_timestamp: i64,
    origin_px: f64,
    day_width_px: f64,
}

impl TimelineScale {
    /// `origin_timestamp` lands on `origin_px`; one day spans `day_width_px`.
    pub fn new(origin_timestamp: i64, origin_px: f64, day_width_px: f64) -> TimelineResult<Self> {
        if !day_width_px.is_finite() || day_width_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "day width must be finite and > 0".to_owned(),
            ));
        }
        if !origin_px.is_finite() {
            return Err(TimelineError::InvalidData(
                "scale origin must be finite".to_owned(),
            ));
        }

        Ok(Self {
            origin_timestamp,
            origin_px,
            day_width_px,
        })
    }

    #[must_use]
    pub fn day_width_px(self) -> f64 {
        self.day_width_px
    }

    #[must_use]
    pub fn ms_per_px(self) -> f64 {
        MS_PER_DAY as f64 / self.day_width_px
    }

    #[must_use]
    pub fn timestamp_to_px(self, timestamp: i64) -> f64 {
        let delta = timestamp.saturating_sub(self.origin_timestamp) as f64;
        self.origin_px + delta / self.ms_per_px()
    }

    #[must_use]
    pub fn px_to_timestamp(self, px: f64) -> f64 {
        self.origin_timestamp as f64 + (px - self.origin_px) * self.ms_per_px()
    }

    /// Pixel length of a duration.
    #[must_use]
    pub fn span_to_px(self, duration_ms: i64) -> f64 {
        duration_ms as f64 / self.ms_per_px()
    }
}
