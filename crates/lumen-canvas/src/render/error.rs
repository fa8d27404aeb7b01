use crate::device::DeviceError;
use crate::shader::ShaderError;

/// Fatal failure of a draw call. The call issued no draw; no attribute
/// stream it enabled is left enabled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("vertex and color array sizes don't match ({vertices} vertices, {colors} colors)")]
    LengthMismatch { vertices: usize, colors: usize },
}
