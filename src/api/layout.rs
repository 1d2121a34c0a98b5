use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::{DaylightWindow, LocationId, StepId, TimelineRange};
use crate::error::{TimelineError, TimelineResult};
use crate::render::{LabelPrimitive, PositionStyle, Rect, to_position_style};

/// Daylight geometry inside one day cell, in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DaylightRect {
    /// Polar night: nothing to draw.
    Hidden,
    /// One contiguous `[sunrise, sunset)` span; the whole cell on polar day.
    Span(Rect),
    /// Local sunset falls before local sunrise: daylight touches both cell edges.
    Wrapped { morning: Rect, evening: Rect },
}

impl DaylightRect {
    #[must_use]
    pub fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    #[must_use]
    pub fn rects(self) -> SmallVec<[Rect; 2]> {
        match self {
            Self::Hidden => SmallVec::new(),
            Self::Span(rect) => smallvec![rect],
            Self::Wrapped { morning, evening } => smallvec![morning, evening],
        }
    }

    #[must_use]
    pub fn styles(self) -> SmallVec<[PositionStyle; 2]> {
        self.rects().into_iter().map(to_position_style).collect()
    }
}

/// One local calendar day on one location's track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    /// `YYYY-MM-DD` in the location's own offset.
    pub date: String,
    /// Local midnight, epoch millis.
    pub timestamp: i64,
    pub has_stay: bool,
    pub has_move: bool,
    pub is_empty: bool,
    pub is_weekend: bool,
    pub rect: Rect,
    pub style: PositionStyle,
    pub daylight: DaylightWindow,
    pub daylight_rect: DaylightRect,
}

/// Horizontal lane for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub location_id: LocationId,
    pub location_name: String,
    pub track_top_px: f64,
    pub name_label: LabelPrimitive,
    pub day_cells: Vec<DayCell>,
}

/// Cross-track shape for one move step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRectangle {
    pub step_id: StepId,
    pub start_location_id: LocationId,
    pub finish_location_id: LocationId,
    pub rect: Rect,
    pub style: PositionStyle,
    pub begin_time_label: LabelPrimitive,
    pub end_time_label: LabelPrimitive,
    pub duration_label: LabelPrimitive,
}

/// Complete derived timeline geometry.
///
/// `min_timestamp == max_timestamp == 0` with no tracks is the "no data" layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub min_timestamp: i64,
    pub max_timestamp: i64,
    pub day_width_px: f64,
    pub total_width_px: f64,
    pub total_height_px: f64,
    pub tracks: IndexMap<LocationId, Track>,
    pub moves: Vec<MoveRectangle>,
}

impl TimelineLayout {
    #[must_use]
    pub fn empty(day_width_px: f64) -> Self {
        Self {
            min_timestamp: 0,
            max_timestamp: 0,
            day_width_px,
            total_width_px: 0.0,
            total_height_px: 0.0,
            tracks: IndexMap::new(),
            moves: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_timestamp == 0 && self.max_timestamp == 0 && self.tracks.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> TimelineRange {
        TimelineRange::new(self.min_timestamp, self.max_timestamp)
    }

    #[must_use]
    pub fn track(&self, location_id: &LocationId) -> Option<&Track> {
        self.tracks.get(location_id)
    }

    #[must_use]
    pub fn move_for(&self, step_id: &StepId) -> Option<&MoveRectangle> {
        self.moves.iter().find(|shape| &shape.step_id == step_id)
    }

    /// Checks that every rect and label is drawable and that moves only
    /// join tracks present in the layout.
    pub fn validate(&self) -> TimelineResult<()> {
        if !self.day_width_px.is_finite() || self.day_width_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "layout day width must be finite and > 0".to_owned(),
            ));
        }
        if self.max_timestamp < self.min_timestamp {
            return Err(TimelineError::InvalidData(format!(
                "layout range ends ({}) before it starts ({})",
                self.max_timestamp, self.min_timestamp
            )));
        }
        Rect::new(0.0, 0.0, self.total_width_px, self.total_height_px).validate()?;

        for (location_id, track) in &self.tracks {
            if location_id != &track.location_id {
                return Err(TimelineError::InvalidData(format!(
                    "track keyed `{location_id}` describes `{}`",
                    track.location_id
                )));
            }
            // Unnamed locations draw an empty name label.
            if !track.location_name.is_empty() {
                track.name_label.validate()?;
            }
            for cell in &track.day_cells {
                cell.rect.validate()?;
                for rect in cell.daylight_rect.rects() {
                    rect.validate()?;
                }
            }
        }

        for shape in &self.moves {
            for location_id in [&shape.start_location_id, &shape.finish_location_id] {
                if !self.tracks.contains_key(location_id) {
                    return Err(TimelineError::UnknownLocation {
                        location_id: location_id.to_string(),
                    });
                }
            }
            shape.rect.validate()?;
            shape.begin_time_label.validate()?;
            shape.end_time_label.validate()?;
            shape.duration_label.validate()?;
        }
        Ok(())
    }
}
