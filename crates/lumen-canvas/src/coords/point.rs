use core::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};

/// Integer point in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Floating-point point in logical pixels.
///
/// Layout is two packed `f32`s so slices of points can be streamed to the GPU
/// as a position attribute without conversion.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or zero for a zero-length input.
    #[inline]
    pub fn normalized_or_zero(self) -> Self {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            self / len
        } else {
            Self::zero()
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for PointF {
    #[inline]
    fn from(p: Point) -> Self {
        PointF::new(p.x as f32, p.y as f32)
    }
}

impl From<(f32, f32)> for PointF {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        PointF::new(x, y)
    }
}

impl From<PointF> for glam::Vec2 {
    #[inline]
    fn from(p: PointF) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

impl Add for PointF {
    type Output = PointF;
    #[inline]
    fn add(self, rhs: PointF) -> PointF {
        PointF::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PointF {
    type Output = PointF;
    #[inline]
    fn sub(self, rhs: PointF) -> PointF {
        PointF::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for PointF {
    type Output = PointF;
    #[inline]
    fn neg(self) -> PointF {
        PointF::new(-self.x, -self.y)
    }
}

impl Mul<f32> for PointF {
    type Output = PointF;
    #[inline]
    fn mul(self, rhs: f32) -> PointF {
        PointF::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for PointF {
    type Output = PointF;
    #[inline]
    fn div(self, rhs: f32) -> PointF {
        PointF::new(self.x / rhs, self.y / rhs)
    }
}
