use bytemuck::{Pod, Zeroable};

use crate::coords::{PointF, RectF};

/// Position plus texture coordinate, for caller-built textured geometry.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct VertexTexcoord {
    pub vtx: PointF,
    pub tc: PointF,
}

impl VertexTexcoord {
    #[inline]
    pub const fn new(vtx: PointF, tc: PointF) -> Self {
        Self { vtx, tc }
    }

    /// Splits interleaved vertices into separate position and texcoord streams.
    pub fn split(vertices: &[VertexTexcoord]) -> (Vec<PointF>, Vec<PointF>) {
        vertices.iter().map(|v| (v.vtx, v.tc)).unzip()
    }
}

// ── rect ──────────────────────────────────────────────────────────────────

/// Four corners in triangle-strip order: TL, TR, BL, BR.
#[inline]
pub fn rect_strip(r: RectF) -> [PointF; 4] {
    [
        PointF::new(r.x1(), r.y1()),
        PointF::new(r.x2(), r.y1()),
        PointF::new(r.x1(), r.y2()),
        PointF::new(r.x2(), r.y2()),
    ]
}

/// Closed outline as a 5-point line strip: TL, TR, BR, BL, TL.
#[inline]
pub fn rect_outline(r: RectF) -> [PointF; 5] {
    [
        PointF::new(r.x1(), r.y1()),
        PointF::new(r.x2(), r.y1()),
        PointF::new(r.x2(), r.y2()),
        PointF::new(r.x1(), r.y2()),
        PointF::new(r.x1(), r.y1()),
    ]
}

/// Texture coordinates for a quad spanning `(tx1, ty1)`–`(tx2, ty2)`, in the
/// same strip order as [`rect_strip`].
#[inline]
pub fn texcoord_strip(tx1: f32, ty1: f32, tx2: f32, ty2: f32) -> [PointF; 4] {
    [
        PointF::new(tx1, ty1),
        PointF::new(tx2, ty1),
        PointF::new(tx1, ty2),
        PointF::new(tx2, ty2),
    ]
}
