use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::device::{GraphicsDevice, UniformValue};

use super::{Attribute, Uniform};

struct Inner<D: GraphicsDevice> {
    name: String,
    program: D::Program,
    uniforms: HashMap<Uniform, D::UniformLocation>,
    attributes: HashMap<Attribute, u32>,
}

/// Cached, linked program plus its semantic uniform/attribute locations.
///
/// Cloning is cheap (shared). Locations are resolved once at load; a
/// semantic the program does not expose resolves to `None`, so callers can
/// branch on capability instead of failing.
pub struct ShaderHandle<D: GraphicsDevice> {
    inner: Rc<Inner<D>>,
}

impl<D: GraphicsDevice> Clone for ShaderHandle<D> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<D: GraphicsDevice> fmt::Debug for ShaderHandle<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderHandle")
            .field("name", &self.inner.name)
            .field("program", &self.inner.program)
            .field("uniforms", &self.inner.uniforms.keys().collect::<Vec<_>>())
            .field("attributes", &self.inner.attributes)
            .finish()
    }
}

impl<D: GraphicsDevice> ShaderHandle<D> {
    /// Reflects every known semantic on `program`.
    pub(super) fn reflect(device: &D, name: &str, program: D::Program) -> Self {
        let uniforms = Uniform::ALL
            .iter()
            .filter_map(|&u| device.uniform_location(program, u.glsl_name()).map(|loc| (u, loc)))
            .collect();
        let attributes = Attribute::ALL
            .iter()
            .filter_map(|&a| device.attribute_location(program, a.glsl_name()).map(|loc| (a, loc)))
            .collect();

        Self {
            inner: Rc::new(Inner { name: name.to_owned(), program, uniforms, attributes }),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[inline]
    pub fn program(&self) -> D::Program {
        self.inner.program
    }

    #[inline]
    pub fn uniform_location(&self, uniform: Uniform) -> Option<&D::UniformLocation> {
        self.inner.uniforms.get(&uniform)
    }

    #[inline]
    pub fn attribute_location(&self, attribute: Attribute) -> Option<u32> {
        self.inner.attributes.get(&attribute).copied()
    }

    #[inline]
    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        self.inner.attributes.contains_key(&attribute)
    }

    pub fn make_active(&self, device: &mut D) {
        device.use_program(self.inner.program);
    }

    /// Uploads `value` if the program exposes `uniform`; returns whether it did.
    pub fn set_uniform(&self, device: &mut D, uniform: Uniform, value: UniformValue) -> bool {
        match self.inner.uniforms.get(&uniform) {
            Some(loc) => {
                device.set_uniform(loc, value);
                true
            }
            None => false,
        }
    }
}
