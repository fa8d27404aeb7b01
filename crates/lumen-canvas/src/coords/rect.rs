use super::{Point, PointF};

/// Integer axis-aligned rectangle in logical pixels (top-left origin).
///
/// A zero width or height is a valid value. Texture blits read it as
/// "use the full texture extent" on that axis.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub const fn from_coordinates(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x: x1, y: y1, w: x2 - x1, h: y2 - y1 }
    }

    #[inline]
    pub const fn x2(self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub const fn y2(self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub const fn top_left(self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Floating-point axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RectF {
    pub origin: PointF,
    pub size: PointF,
}

impl RectF {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: PointF::new(x, y),
            size: PointF::new(w, h),
        }
    }

    #[inline]
    pub fn from_coordinates(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    #[inline]
    pub fn x1(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn y1(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn x2(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn y2(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn mid(self) -> PointF {
        PointF::new((self.x1() + self.x2()) / 2.0, (self.y1() + self.y2()) / 2.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }
}

impl From<Rect> for RectF {
    #[inline]
    fn from(r: Rect) -> Self {
        RectF::new(r.x as f32, r.y as f32, r.w as f32, r.h as f32)
    }
}
