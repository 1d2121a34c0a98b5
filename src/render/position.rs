use std::fmt;

use serde::{Deserialize, Serialize};

use crate::render::Rect;

/// Renderer-agnostic absolute-position style record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionStyle {
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
}

impl PositionStyle {
    /// Style with all four properties at `0px`.
    #[must_use]
    pub fn zero() -> Self {
        Self::from(Rect::default())
    }
}

impl From<Rect> for PositionStyle {
    fn from(rect: Rect) -> Self {
        to_position_style(rect)
    }
}

impl fmt::Display for PositionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left: {}; top: {}; width: {}; height: {};",
            self.left, self.top, self.width, self.height
        )
    }
}

/// Converts a pixel rectangle into a position style record.
///
/// Values are rounded to a thousandth of a pixel; non-finite values render
/// as `0px` and negative sizes collapse to `0px`.
#[must_use]
pub fn to_position_style(rect: Rect) -> PositionStyle {
    PositionStyle {
        left: format_px(rect.left),
        top: format_px(rect.top),
        width: format_px(rect.width.max(0.0)),
        height: format_px(rect.height.max(0.0)),
    }
}

fn format_px(value: f64) -> String {
    if !value.is_finite() {
        return "0px".to_owned();
    }
    let mut rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // Avoid "-0px".
        rounded = 0.0;
    }
    format!("{rounded}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formatting_trims_and_rounds() {
        assert_eq!(format_px(12.0), "12px");
        assert_eq!(format_px(12.5), "12.5px");
        assert_eq!(format_px(1.0 / 3.0), "0.333px");
        assert_eq!(format_px(-0.0001), "0px");
        assert_eq!(format_px(f64::NAN), "0px");
    }
}
