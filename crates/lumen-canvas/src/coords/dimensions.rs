/// Logical pixel dimensions of the canvas.
///
/// The projection is derived from these; a zero extent is tolerated but yields
/// a degenerate projection (nothing visible) until real dimensions arrive.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}
