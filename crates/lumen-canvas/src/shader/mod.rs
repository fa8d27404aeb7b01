//! Shader programs: semantic names, sources, and the per-context registry.
//!
//! Programs are compiled on first request and cached for the lifetime of the
//! [`ShaderProgramRegistry`]. Nothing is recompiled afterwards; a context that
//! loses its GL objects must call [`ShaderProgramRegistry::invalidate`].

mod error;
mod handle;
mod registry;
mod semantic;
mod source;

pub use error::{ShaderError, ShaderStage};
pub use handle::ShaderHandle;
pub use registry::ShaderProgramRegistry;
pub use semantic::{Attribute, Uniform};
pub use source::{programs, ShaderSource};
