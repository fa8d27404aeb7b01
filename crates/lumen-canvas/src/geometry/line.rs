use crate::coords::{LineF, PointF};

use super::VertexStream;

/// Expands segment pairs into a stream for distance-field antialiased lines.
///
/// `points` is read as disjoint pairs `(p0, p1), (p2, p3), ...`; a trailing
/// unpaired point is ignored. Each segment emits four vertices, both
/// endpoints twice, carrying the unit normal on one side and then the other:
///
/// ```text
/// p0 +n, p0 -n, p1 +n, p1 -n
/// ```
///
/// A zero-length segment gets zero normals and so collapses to nothing.
pub fn antialiased_segments(points: &[PointF]) -> VertexStream<'static> {
    let segments = points.len() / 2;
    let mut positions = Vec::with_capacity(segments * 4);
    let mut normals = Vec::with_capacity(segments * 4);

    for pair in points.chunks_exact(2) {
        let (d1, d2) = LineF::new(pair[0], pair[1]).normals();

        positions.extend_from_slice(&[pair[0], pair[0], pair[1], pair[1]]);
        normals.extend_from_slice(&[d1, d2, d1, d2]);
    }

    VertexStream::new(positions).with_normals(normals)
}
