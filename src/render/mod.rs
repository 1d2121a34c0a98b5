//! Renderer-agnostic geometry consumed by the host's drawing layer.
//!
//! Nothing here draws; layouts are plain rectangles, labels and style records.

mod position;
mod primitives;

pub use position::{PositionStyle, to_position_style};
pub use primitives::{LabelPrimitive, Rect, TextHAlign, TextVAlign};
