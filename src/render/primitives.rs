use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Axis-aligned rectangle in layout pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds a rectangle from two corners, normalizing their order.
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(
            left.min(right),
            top.min(bottom),
            (right - left).abs(),
            (bottom - top).abs(),
        )
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.left + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn validate(self) -> TimelineResult<()> {
        if !self.left.is_finite()
            || !self.top.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(TimelineError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(TimelineError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `LabelPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `LabelPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextVAlign {
    Top,
    Middle,
    Bottom,
}

/// One text label anchored at a point in layout pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl LabelPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        h_align: TextHAlign,
        v_align: TextVAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            h_align,
            v_align,
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.text.is_empty() {
            return Err(TimelineError::InvalidData(
                "label text must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(TimelineError::InvalidData(
                "label coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
