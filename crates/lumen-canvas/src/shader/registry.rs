use std::collections::HashMap;

use crate::device::GraphicsDevice;

use super::{programs, ShaderError, ShaderHandle, ShaderSource};

/// Per-context cache of compiled programs, keyed by name.
///
/// The first [`get_or_load`](Self::get_or_load) for a name compiles and links
/// its declared source; every later call returns the cached handle. A failed
/// compile is not cached, so the error repeats on the next request.
///
/// Not synchronized: a registry belongs to one render thread.
pub struct ShaderProgramRegistry<D: GraphicsDevice> {
    sources: HashMap<String, ShaderSource>,
    loaded: HashMap<String, ShaderHandle<D>>,
}

impl<D: GraphicsDevice> Default for ShaderProgramRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: GraphicsDevice> ShaderProgramRegistry<D> {
    /// Registry with every built-in program declared (none compiled yet).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for name in programs::BUILTIN {
            if let Some(src) = ShaderSource::builtin(name) {
                registry.sources.insert(name.to_owned(), src);
            }
        }
        registry
    }

    /// Registry with nothing declared.
    pub fn empty() -> Self {
        Self { sources: HashMap::new(), loaded: HashMap::new() }
    }

    /// Declares (or replaces) the source for `name`.
    ///
    /// Has no effect on a program already loaded under that name.
    pub fn declare(&mut self, name: impl Into<String>, source: ShaderSource) {
        let name = name.into();
        if self.loaded.contains_key(&name) {
            log::warn!("shader `{name}` already loaded; new source applies after invalidate()");
        }
        self.sources.insert(name, source);
    }

    #[inline]
    pub fn is_declared(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    #[inline]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    /// Number of compiled programs held.
    #[inline]
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Returns the cached handle for `name`, compiling it on first use.
    pub fn get_or_load(&mut self, device: &mut D, name: &str) -> Result<ShaderHandle<D>, ShaderError> {
        if let Some(handle) = self.loaded.get(name) {
            return Ok(handle.clone());
        }

        let source = self
            .sources
            .get(name)
            .ok_or_else(|| ShaderError::UnknownProgram(name.to_owned()))?;

        let program = device.compile_program(name, source).inspect_err(|err| {
            log::error!("{err}");
        })?;

        let handle = ShaderHandle::reflect(device, name, program);
        log::debug!("compiled shader program `{name}`: {handle:?}");
        self.loaded.insert(name.to_owned(), handle.clone());
        Ok(handle)
    }

    /// Forgets every cached handle without touching the device.
    ///
    /// For the owning context after its GL objects are gone (context loss);
    /// the next request for each name compiles again.
    pub fn invalidate(&mut self) {
        if !self.loaded.is_empty() {
            log::debug!("invalidating {} cached shader programs", self.loaded.len());
        }
        self.loaded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RecordingDevice;
    use crate::shader::{Attribute, Uniform};

    #[test]
    fn second_request_reuses_cached_program() {
        let mut dev = RecordingDevice::new();
        let mut reg = ShaderProgramRegistry::new();

        let a = reg.get_or_load(&mut dev, programs::SIMPLE).unwrap();
        let b = reg.get_or_load(&mut dev, programs::SIMPLE).unwrap();

        assert_eq!(a.program(), b.program());
        assert_eq!(dev.compile_count(programs::SIMPLE), 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn distinct_names_compile_separately() {
        let mut dev = RecordingDevice::new();
        let mut reg = ShaderProgramRegistry::new();
        let a = reg.get_or_load(&mut dev, programs::SIMPLE).unwrap();
        let b = reg.get_or_load(&mut dev, programs::CIRCLE).unwrap();
        assert_ne!(a.program(), b.program());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn unknown_program_is_an_error() {
        let mut dev = RecordingDevice::new();
        let mut reg = ShaderProgramRegistry::<RecordingDevice>::empty();
        let err = reg.get_or_load(&mut dev, programs::SIMPLE).unwrap_err();
        assert_eq!(err, ShaderError::UnknownProgram(programs::SIMPLE.to_owned()));
    }

    #[test]
    fn failed_compile_is_not_cached() {
        let mut dev = RecordingDevice::new();
        dev.fail_compile(programs::CIRCLE);
        let mut reg = ShaderProgramRegistry::new();
        assert!(reg.get_or_load(&mut dev, programs::CIRCLE).is_err());
        assert!(!reg.is_loaded(programs::CIRCLE));
        assert!(reg.get_or_load(&mut dev, programs::CIRCLE).is_err());
    }

    #[test]
    fn missing_semantics_resolve_to_none() {
        let mut dev = RecordingDevice::new();
        let mut reg = ShaderProgramRegistry::new();
        let simple = reg.get_or_load(&mut dev, programs::SIMPLE).unwrap();
        assert!(simple.has_attribute(Attribute::Position));
        assert!(!simple.has_attribute(Attribute::Normal));
        assert!(simple.uniform_location(Uniform::Blur).is_none());

        let line = reg.get_or_load(&mut dev, programs::LINE_AA).unwrap();
        assert!(line.has_attribute(Attribute::Normal));
        assert!(line.uniform_location(Uniform::Blur).is_some());
    }

    #[test]
    fn invalidate_forces_recompile() {
        let mut dev = RecordingDevice::new();
        let mut reg = ShaderProgramRegistry::new();
        reg.get_or_load(&mut dev, programs::TEXTURED).unwrap();
        reg.invalidate();
        assert!(reg.is_empty());
        reg.get_or_load(&mut dev, programs::TEXTURED).unwrap();
        assert_eq!(dev.compile_count(programs::TEXTURED), 2);
    }

    #[test]
    fn declared_override_is_used_for_first_load() {
        let mut dev = RecordingDevice::new();
        let mut reg = ShaderProgramRegistry::new();
        reg.declare(
            programs::LINE_AA,
            ShaderSource::new(
                "uniform mat4 mv_matrix;\nin vec2 a_position;\nvoid main() {}\n",
                "void main() {}\n",
            ),
        );
        let line = reg.get_or_load(&mut dev, programs::LINE_AA).unwrap();
        assert!(!line.has_attribute(Attribute::Normal));
    }
}
