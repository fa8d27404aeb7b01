//! GL-style device command surface.
//!
//! The canvas never talks to a graphics API directly; it drives a
//! [`GraphicsDevice`], which mirrors the small slice of immediate-mode OpenGL
//! the canvas needs:
//! - program compilation and reflection (uniform / attribute lookup)
//! - uniform upload and texture binding
//! - per-draw attribute streams (enable, point at data, disable)
//! - line width and `draw_arrays`
//!
//! [`GlowDevice`] is the OpenGL implementation. [`RecordingDevice`] records the
//! command stream without a GPU and backs the crate's tests.

mod error;
mod gl;
mod recording;
mod topology;

use std::fmt;

use crate::coords::PointF;
use crate::paint::Rgba8;
use crate::shader::{ShaderError, ShaderSource};

pub use gl::GlowDevice;
pub use error::DeviceError;
pub use recording::{Command, RecordedAttribute, RecordedUniform, RecordingDevice};
pub use topology::Topology;

/// Value uploaded to a uniform location.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec4([f32; 4]),
    /// Column-major 4×4 matrix.
    Mat4([f32; 16]),
}

/// Client-side data for one attribute stream.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AttributeData<'a> {
    /// Two `f32` components per vertex.
    Float2(&'a [PointF]),
    /// Four normalized `u8` components per vertex.
    Rgba8(&'a [Rgba8]),
}

impl AttributeData<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            AttributeData::Float2(v) => v.len(),
            AttributeData::Rgba8(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw bytes as laid out for upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AttributeData::Float2(v) => bytemuck::cast_slice(v),
            AttributeData::Rgba8(v) => bytemuck::cast_slice(v),
        }
    }
}

/// Low-level command surface the canvas draws through.
///
/// Implementations hold ambient device state (active program, enabled
/// attribute streams, bound texture). Callers must use a device from one
/// thread only and bracket every `enable_attribute` with a matching
/// `disable_attribute` inside the same draw.
pub trait GraphicsDevice {
    type Program: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;
    type Texture: Copy + fmt::Debug;

    /// Compiles and links a program. `name` is used for diagnostics only.
    fn compile_program(
        &mut self,
        name: &str,
        source: &ShaderSource,
    ) -> Result<Self::Program, ShaderError>;

    /// Location of a uniform, or `None` if the program does not expose it.
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    /// Location of a vertex attribute, or `None` if the program does not expose it.
    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    fn use_program(&mut self, program: Self::Program);

    fn set_uniform(&mut self, location: &Self::UniformLocation, value: UniformValue);

    fn bind_texture(&mut self, unit: u32, texture: Self::Texture);

    fn enable_attribute(&mut self, location: u32);

    fn disable_attribute(&mut self, location: u32);

    /// Points an enabled attribute at client data for the next draw.
    fn attribute_pointer(&mut self, location: u32, data: AttributeData<'_>) -> Result<(), DeviceError>;

    /// Rasterized width, in pixels, of line topologies drawn afterwards.
    fn line_width(&mut self, width: f32);

    fn draw_arrays(&mut self, topology: Topology, first: usize, count: usize);
}
