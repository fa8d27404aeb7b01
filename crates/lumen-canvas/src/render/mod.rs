//! Primitive drawing.
//!
//! [`Canvas`] is the backend-neutral drawing surface; [`GlCanvas`] is its
//! variant for GL-style devices. Each draw call resolves its shader program,
//! binds the composed transform and color uniforms, streams transient vertex
//! attributes, issues one `draw_arrays` (two for a stroked rect), and leaves
//! no attribute stream enabled on return.
//!
//! Convention:
//! - geometry is in logical pixels (top-left origin, +Y down)
//! - nothing is batched or reordered; calls hit the device in issue order

mod canvas;
mod config;
mod error;
mod gl_canvas;
mod streams;

pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use error::CanvasError;
pub use gl_canvas::{create_gl_canvas, GlCanvas};
