//! Lumen canvas crate.
//!
//! Immediate-mode 2D vector drawing in logical pixels: textured blits, rects,
//! lines, polygons, circles and points, issued straight to a GL-style device
//! with per-call shader programs and transient vertex streams.
//!
//! [`render::create_gl_canvas`] builds the OpenGL canvas for a current
//! `glow` context; [`device::RecordingDevice`] drives the same canvas
//! headlessly.

pub mod coords;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
pub mod texture;
pub mod transform;
