//! Geometry generators: pure expansions of shape requests into vertex streams.
//!
//! Vertex order in every generator matches the topology the canvas draws it
//! with; changing an order changes the rendered shape.

mod circle;
mod line;
mod quad;
mod stream;

pub use circle::{circle_fan, circle_fan_angles, CIRCLE_STEP_MULTIPLIER, MAX_FAN_SAMPLES};
pub use line::antialiased_segments;
pub use quad::{rect_outline, rect_strip, texcoord_strip, VertexTexcoord};
pub use stream::VertexStream;
