//! Coordinate and geometry value types consumed by the canvas.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The canvas projection maps this space to device coordinates.

mod dimensions;
mod line;
mod point;
mod rect;

pub use dimensions::Dimensions;
pub use line::LineF;
pub use point::{Point, PointF};
pub use rect::{Rect, RectF};
