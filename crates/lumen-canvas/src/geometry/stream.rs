use std::borrow::Cow;

use crate::coords::PointF;
use crate::paint::Rgba8;

/// Transient per-vertex attributes for exactly one draw call.
///
/// `positions` defines the vertex count; optional streams, when present,
/// are expected to be at least that long.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexStream<'a> {
    pub positions: Cow<'a, [PointF]>,
    pub texcoords: Option<Cow<'a, [PointF]>>,
    pub colors: Option<Cow<'a, [Rgba8]>>,
    pub normals: Option<Cow<'a, [PointF]>>,
}

impl<'a> VertexStream<'a> {
    pub fn new(positions: impl Into<Cow<'a, [PointF]>>) -> Self {
        Self { positions: positions.into(), texcoords: None, colors: None, normals: None }
    }

    pub fn with_texcoords(mut self, texcoords: impl Into<Cow<'a, [PointF]>>) -> Self {
        self.texcoords = Some(texcoords.into());
        self
    }

    pub fn with_colors(mut self, colors: impl Into<Cow<'a, [Rgba8]>>) -> Self {
        self.colors = Some(colors.into());
        self
    }

    pub fn with_normals(mut self, normals: impl Into<Cow<'a, [PointF]>>) -> Self {
        self.normals = Some(normals.into());
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
