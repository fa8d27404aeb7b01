//! Color model shared by the canvas and its callers.
//!
//! Scope:
//! - uniform colors (straight alpha, normalized floats)
//! - per-vertex colors (normalized bytes)
//! - tint composition against the canvas's ambient color

pub mod color;
mod tint;

pub use color::{Color, Rgba8};
pub use tint::compose_tint;
