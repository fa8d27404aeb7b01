//! Texture capability consumed by textured blits.
//!
//! Decoding and upload happen elsewhere; the canvas only needs to bind a
//! texture and map pixel offsets into [0, 1] texture space.

use crate::device::GraphicsDevice;

/// A bound-able texture of known pixel size.
pub trait Texture<D: GraphicsDevice> {
    fn id(&self) -> D::Texture;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn bind(&self, device: &mut D, unit: u32) {
        device.bind_texture(unit, self.id());
    }

    /// Pixel column `x` in normalized texture space.
    fn normalized_coord_x(&self, x: i32) -> f32 {
        x as f32 / self.width().max(1) as f32
    }

    /// Pixel row `y` in normalized texture space.
    fn normalized_coord_y(&self, y: i32) -> f32 {
        y as f32 / self.height().max(1) as f32
    }
}

/// Plain texture description: a device handle plus its pixel size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextureRef<T> {
    pub id: T,
    pub width: u32,
    pub height: u32,
}

impl<T> TextureRef<T> {
    #[inline]
    pub const fn new(id: T, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

impl<D: GraphicsDevice> Texture<D> for TextureRef<D::Texture> {
    #[inline]
    fn id(&self) -> D::Texture {
        self.id
    }

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }
}
