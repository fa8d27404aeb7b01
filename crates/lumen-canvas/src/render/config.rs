use crate::geometry::CIRCLE_STEP_MULTIPLIER;

/// Tuning parameters for a canvas.
///
/// Defaults reproduce the established look; change them only with a concrete
/// visual requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Edge softness, in pixels, of antialiased lines (`u_blur`).
    pub line_blur: f32,

    /// Angular-step multiplier for per-vertex-colored circles.
    ///
    /// Step is `2π × multiplier / color_count`.
    pub circle_step_multiplier: f64,

    /// Ring thickness of hollow circles, in pixels.
    pub hollow_circle_stroke: f32,

    /// Texture unit used by textured blits.
    pub texture_unit: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            line_blur: 2.0,
            circle_step_multiplier: CIRCLE_STEP_MULTIPLIER,
            hollow_circle_stroke: 1.0,
            texture_unit: 0,
        }
    }
}
