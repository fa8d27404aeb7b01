//! Transform composition for canvas draws.
//!
//! Every draw binds `projection × shape_local × model`:
//! - `projection` is fixed by the canvas's logical dimensions
//! - `shape_local` is the per-shape rotation (about the shape centroid for
//!   rects and blits, about the coordinate origin for everything else)
//! - `model` comes from the caller through a [`ModelMatrixProvider`]

mod model;
mod projection;

pub use model::{ModelMatrixProvider, ModelStack};
pub use projection::{compose_mvp, orthographic, rotation_about, rotation_about_origin};
