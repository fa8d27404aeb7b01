use crate::coords::{Dimensions, PointF, Rect, RectF};
use crate::geometry::VertexTexcoord;
use crate::paint::{Color, Rgba8};

use super::CanvasError;

/// Immediate-mode 2D drawing surface.
///
/// All geometry is in logical pixels. Every draw composes the canvas
/// projection with the caller's model transform, issues its GPU work
/// immediately, and returns with no attribute stream left enabled. Errors
/// abort only the current call.
///
/// Single-threaded: a canvas and its device must only be used from the
/// render thread.
pub trait Canvas {
    /// Texture type accepted by the blit operations.
    type Texture: ?Sized;

    /// Sets the logical pixel size and recomputes the projection before
    /// returning, so the next draw uses it.
    fn set_logical_dimensions(&mut self, width: u32, height: u32);

    fn dimensions(&self) -> Dimensions;

    /// Draws the `src` pixel region of `texture` into `dst`, rotated about
    /// the center of `dst`.
    ///
    /// A zero width or height in `src` spans to the texture's full extent on
    /// that axis.
    fn blit_texture(
        &mut self,
        texture: &Self::Texture,
        src: Rect,
        rotation: f32,
        dst: impl Into<RectF>,
        tint: Color,
    ) -> Result<(), CanvasError>;

    /// Draws caller-built textured geometry as a triangle strip, rotated
    /// about the coordinate origin.
    fn blit_texture_vertices(
        &mut self,
        texture: &Self::Texture,
        vertices: &[VertexTexcoord],
        rotation: f32,
        tint: Color,
    ) -> Result<(), CanvasError>;

    /// Filled rect rotated about its center, optionally outlined in `stroke`.
    fn draw_solid_rect(
        &mut self,
        rect: impl Into<RectF>,
        fill: Color,
        stroke: Option<Color>,
        rotation: f32,
    ) -> Result<(), CanvasError>;

    /// Rect outline rotated about its center.
    fn draw_hollow_rect(
        &mut self,
        rect: impl Into<RectF>,
        stroke: Color,
        rotation: f32,
    ) -> Result<(), CanvasError>;

    /// Single aliased line.
    fn draw_line(
        &mut self,
        p1: impl Into<PointF>,
        p2: impl Into<PointF>,
        color: Color,
    ) -> Result<(), CanvasError>;

    /// Antialiased segments from point pairs `(p0, p1), (p2, p3), ...`.
    ///
    /// Draws nothing, without error, when the line program lacks a normal
    /// input.
    fn draw_lines(&mut self, points: &[PointF], line_width: f32, color: Color) -> Result<(), CanvasError>;

    /// Aliased segments with one color per point.
    ///
    /// Fails with [`CanvasError::LengthMismatch`] unless
    /// `points.len() == colors.len()`.
    fn draw_lines_colored(
        &mut self,
        points: &[PointF],
        line_width: f32,
        colors: &[Rgba8],
    ) -> Result<(), CanvasError>;

    /// Open polyline through `points`.
    fn draw_line_strip(&mut self, points: &[PointF], line_width: f32, color: Color) -> Result<(), CanvasError>;

    /// Closed polyline through `points`.
    fn draw_line_loop(&mut self, points: &[PointF], line_width: f32, color: Color) -> Result<(), CanvasError>;

    /// Fills a convex polygon given in winding order. Not validated.
    fn draw_polygon(&mut self, points: &[PointF], color: Color) -> Result<(), CanvasError>;

    /// Filled circle with an analytic (shader-side) smooth edge.
    fn draw_solid_circle(
        &mut self,
        center: impl Into<PointF>,
        radius: f32,
        color: Color,
    ) -> Result<(), CanvasError>;

    /// Filled circle approximated by a triangle fan whose resolution follows
    /// `colors.len()`; vertex `i` takes `colors[i % colors.len()]`.
    fn draw_solid_circle_colored(
        &mut self,
        center: impl Into<PointF>,
        radius: f32,
        colors: &[Rgba8],
    ) -> Result<(), CanvasError>;

    /// Ring of the configured stroke width inside `radius`.
    fn draw_hollow_circle(
        &mut self,
        center: impl Into<PointF>,
        radius: f32,
        color: Color,
    ) -> Result<(), CanvasError>;

    /// One point sprite of extent `point_radius` per entry.
    fn draw_points(&mut self, points: &[PointF], point_radius: f32, color: Color) -> Result<(), CanvasError>;
}
