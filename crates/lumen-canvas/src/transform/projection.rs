use glam::{Mat4, Vec3};

use crate::coords::{Dimensions, PointF};

/// Orthographic projection for a logical pixel space with a top-left origin
/// and +Y down. Depth range is [-1, 1].
#[inline]
pub fn orthographic(dims: Dimensions) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, dims.width as f32, dims.height as f32, 0.0, -1.0, 1.0)
}

/// Rotation by `radians` about `center` (in the XY plane).
#[inline]
pub fn rotation_about(center: PointF, radians: f32) -> Mat4 {
    let c = Vec3::new(center.x, center.y, 0.0);
    Mat4::from_translation(c) * Mat4::from_rotation_z(radians) * Mat4::from_translation(-c)
}

/// Rotation by `radians` about the coordinate origin.
#[inline]
pub fn rotation_about_origin(radians: f32) -> Mat4 {
    Mat4::from_rotation_z(radians)
}

/// Final matrix bound for a draw: `projection × shape_local × model`.
#[inline]
pub fn compose_mvp(projection: Mat4, shape_local: Mat4, model: Mat4) -> Mat4 {
    projection * shape_local * model
}
