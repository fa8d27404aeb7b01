/// Primitive topology of a `draw_arrays` call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    TriangleStrip,
    TriangleFan,
    /// Filled convex polygon in vertex order.
    Polygon,
}

impl Topology {
    /// OpenGL enum for this topology.
    ///
    /// Core profiles have no `GL_POLYGON`; a convex polygon fills identically
    /// as a triangle fan from its first vertex.
    pub fn gl_mode(self) -> u32 {
        match self {
            Topology::Points => glow::POINTS,
            Topology::Lines => glow::LINES,
            Topology::LineStrip => glow::LINE_STRIP,
            Topology::LineLoop => glow::LINE_LOOP,
            Topology::TriangleStrip => glow::TRIANGLE_STRIP,
            Topology::TriangleFan | Topology::Polygon => glow::TRIANGLE_FAN,
        }
    }
}
