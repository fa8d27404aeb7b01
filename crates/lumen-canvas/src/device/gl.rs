use std::sync::Arc;

use glow::HasContext;

use crate::shader::{ShaderError, ShaderSource, ShaderStage};

use super::{AttributeData, DeviceError, GraphicsDevice, Topology, UniformValue};

/// OpenGL implementation of [`GraphicsDevice`] over a `glow` context.
///
/// Attribute data is streamed through transient buffer objects: each
/// `attribute_pointer` uploads into a fresh `ARRAY_BUFFER`, and those buffers
/// are deleted as soon as the last enabled attribute of the draw is disabled.
/// The only object held across draws is the vertex array object core
/// profiles require to be bound; it is created here and deleted on drop.
///
/// # Safety contract
///
/// The `glow::Context` must be current on the calling thread for every
/// method call and for drop.
pub struct GlowDevice {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
    enabled: Vec<u32>,
    transient: Vec<glow::Buffer>,
    line_width_range: [f32; 2],
}

impl GlowDevice {
    /// Wraps a current context and prepares the state the canvas relies on:
    /// a bound VAO, program point size, and straight-alpha blending.
    pub fn new(gl: Arc<glow::Context>) -> Result<Self, DeviceError> {
        let mut line_width_range = [1.0f32; 2];
        // SAFETY: caller guarantees the context is current on this thread.
        let vao = unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|reason| DeviceError::Create { what: "vertex array", reason })?;
            gl.bind_vertex_array(Some(vao));
            gl.enable(glow::PROGRAM_POINT_SIZE);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.get_parameter_f32_slice(glow::ALIASED_LINE_WIDTH_RANGE, &mut line_width_range);
            vao
        };

        log::debug!("GlowDevice ready, line width range {line_width_range:?}");
        Ok(Self { gl, vao, enabled: Vec::new(), transient: Vec::new(), line_width_range })
    }

    /// Shared handle to the underlying context.
    #[inline]
    pub fn context(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    unsafe fn compile_stage(
        &self,
        program_name: &str,
        stage: ShaderStage,
        source: &str,
    ) -> Result<glow::Shader, ShaderError> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe {
            let shader = self.gl.create_shader(kind).map_err(|reason| ShaderError::Create {
                program: program_name.to_owned(),
                reason,
            })?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(ShaderError::Compile { program: program_name.to_owned(), stage, log });
            }
            Ok(shader)
        }
    }

    fn release_transient(&mut self) {
        if self.transient.is_empty() {
            return;
        }
        // SAFETY: context current per type contract.
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            for buffer in self.transient.drain(..) {
                self.gl.delete_buffer(buffer);
            }
        }
    }
}

impl GraphicsDevice for GlowDevice {
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;
    type Texture = glow::Texture;

    fn compile_program(
        &mut self,
        name: &str,
        source: &ShaderSource,
    ) -> Result<Self::Program, ShaderError> {
        // SAFETY: context current per type contract.
        unsafe {
            let vs = self.compile_stage(name, ShaderStage::Vertex, &source.vertex)?;
            let fs = match self.compile_stage(name, ShaderStage::Fragment, &source.fragment) {
                Ok(fs) => fs,
                Err(err) => {
                    self.gl.delete_shader(vs);
                    return Err(err);
                }
            };

            let program = match self.gl.create_program() {
                Ok(p) => p,
                Err(reason) => {
                    self.gl.delete_shader(vs);
                    self.gl.delete_shader(fs);
                    return Err(ShaderError::Create { program: name.to_owned(), reason });
                }
            };

            self.gl.attach_shader(program, vs);
            self.gl.attach_shader(program, fs);
            self.gl.link_program(program);
            let linked = self.gl.get_program_link_status(program);

            self.gl.detach_shader(program, vs);
            self.gl.detach_shader(program, fs);
            self.gl.delete_shader(vs);
            self.gl.delete_shader(fs);

            if !linked {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(ShaderError::Link { program: name.to_owned(), log });
            }
            Ok(program)
        }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        // SAFETY: context current per type contract.
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        // SAFETY: context current per type contract.
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn use_program(&mut self, program: Self::Program) {
        // SAFETY: context current per type contract.
        unsafe { self.gl.use_program(Some(program)) }
    }

    fn set_uniform(&mut self, location: &Self::UniformLocation, value: UniformValue) {
        // SAFETY: context current per type contract.
        unsafe {
            match value {
                UniformValue::Float(v) => self.gl.uniform_1_f32(Some(location), v),
                UniformValue::Int(v) => self.gl.uniform_1_i32(Some(location), v),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32_slice(Some(location), &v),
                UniformValue::Mat4(m) => self.gl.uniform_matrix_4_f32_slice(Some(location), false, &m),
            }
        }
    }

    fn bind_texture(&mut self, unit: u32, texture: Self::Texture) {
        // SAFETY: context current per type contract.
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        }
    }

    fn enable_attribute(&mut self, location: u32) {
        // SAFETY: context current per type contract.
        unsafe { self.gl.enable_vertex_attrib_array(location) }
        self.enabled.push(location);
    }

    fn disable_attribute(&mut self, location: u32) {
        // SAFETY: context current per type contract.
        unsafe { self.gl.disable_vertex_attrib_array(location) }
        self.enabled.retain(|&l| l != location);
        if self.enabled.is_empty() {
            self.release_transient();
        }
    }

    fn attribute_pointer(&mut self, location: u32, data: AttributeData<'_>) -> Result<(), DeviceError> {
        // SAFETY: context current per type contract.
        unsafe {
            let buffer = self
                .gl
                .create_buffer()
                .map_err(|reason| DeviceError::Create { what: "attribute buffer", reason })?;
            self.transient.push(buffer);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data.as_bytes(), glow::STREAM_DRAW);
            match data {
                AttributeData::Float2(_) => {
                    self.gl.vertex_attrib_pointer_f32(location, 2, glow::FLOAT, false, 0, 0)
                }
                AttributeData::Rgba8(_) => {
                    self.gl.vertex_attrib_pointer_f32(location, 4, glow::UNSIGNED_BYTE, true, 0, 0)
                }
            }
        }
        Ok(())
    }

    fn line_width(&mut self, width: f32) {
        // Widths outside the supported range are an INVALID_VALUE on core profiles.
        let [min, max] = self.line_width_range;
        let clamped = width.max(min.min(max)).min(max.max(min));
        if clamped != width {
            log::trace!("line width {width} clamped to {clamped}");
        }
        // SAFETY: context current per type contract.
        unsafe { self.gl.line_width(clamped) }
    }

    fn draw_arrays(&mut self, topology: Topology, first: usize, count: usize) {
        // SAFETY: context current per type contract.
        unsafe { self.gl.draw_arrays(topology.gl_mode(), first as i32, count as i32) }
    }
}

impl Drop for GlowDevice {
    fn drop(&mut self) {
        self.release_transient();
        // SAFETY: context current per type contract.
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
