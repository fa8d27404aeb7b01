use super::PointF;

/// Line segment in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LineF {
    pub p1: PointF,
    pub p2: PointF,
}

impl LineF {
    #[inline]
    pub const fn new(p1: PointF, p2: PointF) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub fn delta(self) -> PointF {
        self.p2 - self.p1
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.delta().length()
    }

    /// Unit normals on either side of the segment: `(dy, -dx)` and `(-dy, dx)`.
    ///
    /// A zero-length segment has no direction; both normals are zero.
    #[inline]
    pub fn normals(self) -> (PointF, PointF) {
        let d = self.delta();
        let n = PointF::new(d.y, -d.x).normalized_or_zero();
        (n, -n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_segment_normals_point_up_and_down() {
        let l = LineF::new(PointF::new(0.0, 0.0), PointF::new(10.0, 0.0));
        let (a, b) = l.normals();
        assert_eq!(a, PointF::new(0.0, -1.0));
        assert_eq!(b, PointF::new(0.0, 1.0));
    }

    #[test]
    fn degenerate_segment_has_zero_normals() {
        let p = PointF::new(4.0, 4.0);
        let (a, b) = LineF::new(p, p).normals();
        assert_eq!(a, PointF::zero());
        assert_eq!(b, PointF::zero());
    }
}
