use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::coords::{Dimensions, PointF, Rect, RectF};
use crate::device::{GlowDevice, GraphicsDevice, Topology, UniformValue};
use crate::geometry::{
    antialiased_segments, circle_fan, rect_outline, rect_strip, texcoord_strip, VertexStream,
    VertexTexcoord,
};
use crate::paint::{compose_tint, Color, Rgba8};
use crate::shader::{programs, Attribute, ShaderHandle, ShaderProgramRegistry, Uniform};
use crate::texture;
use crate::transform::{
    compose_mvp, orthographic, rotation_about, rotation_about_origin, ModelMatrixProvider,
    ModelStack,
};

use super::streams::{draw_stream, draw_stream_ranges, DrawRange};
use super::{Canvas, CanvasConfig, CanvasError};

/// Creates the OpenGL canvas for a current `glow` context and compiles every
/// built-in program up front, so a broken driver fails here rather than on
/// the first draw.
pub fn create_gl_canvas(
    gl: Arc<glow::Context>,
    dims: Dimensions,
    config: CanvasConfig,
) -> Result<GlCanvas<GlowDevice>, CanvasError> {
    let device = GlowDevice::new(gl)?;
    let mut canvas = GlCanvas::new(device, dims, config);
    canvas.preload()?;
    log::info!("GL canvas ready at {}x{}", dims.width, dims.height);
    Ok(canvas)
}

/// [`Canvas`] over a GL-style [`GraphicsDevice`].
///
/// Owns the device, the shader registry for that device's context, the
/// projection, the model stack composed into every draw, and the ambient
/// color stack used to tint textured blits.
pub struct GlCanvas<D: GraphicsDevice> {
    device: D,
    shaders: ShaderProgramRegistry<D>,
    config: CanvasConfig,

    dims: Dimensions,
    projection: Mat4,

    model: ModelStack,
    colors: Vec<Color>,
}

impl<D: GraphicsDevice> GlCanvas<D> {
    pub fn new(device: D, dims: Dimensions, config: CanvasConfig) -> Self {
        Self::with_shaders(device, ShaderProgramRegistry::new(), dims, config)
    }

    /// Uses `shaders` instead of a fresh registry with the built-in programs.
    pub fn with_shaders(
        device: D,
        shaders: ShaderProgramRegistry<D>,
        dims: Dimensions,
        config: CanvasConfig,
    ) -> Self {
        Self {
            device,
            shaders,
            config,
            dims,
            projection: orthographic(dims),
            model: ModelStack::new(),
            colors: vec![Color::white()],
        }
    }

    /// Compiles every built-in program that is declared and not yet loaded.
    pub fn preload(&mut self) -> Result<(), CanvasError> {
        for name in programs::BUILTIN {
            if self.shaders.is_declared(name) {
                self.shaders.get_or_load(&mut self.device, name)?;
            }
        }
        Ok(())
    }

    // ── accessors ──────────────────────────────────────────────────────────

    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[inline]
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    #[inline]
    pub fn into_device(self) -> D {
        self.device
    }

    #[inline]
    pub fn shaders(&self) -> &ShaderProgramRegistry<D> {
        &self.shaders
    }

    #[inline]
    pub fn shaders_mut(&mut self) -> &mut ShaderProgramRegistry<D> {
        &mut self.shaders
    }

    #[inline]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut CanvasConfig {
        &mut self.config
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    // ── ambient color ──────────────────────────────────────────────────────

    /// Ambient color multiplied into textured blits.
    #[inline]
    pub fn color(&self) -> Color {
        self.colors.last().copied().unwrap_or_default()
    }

    /// Replaces the current ambient color.
    pub fn set_color(&mut self, color: Color) {
        if let Some(top) = self.colors.last_mut() {
            *top = color;
        }
    }

    /// Runs `f` with `color` as the ambient color, then restores the previous one.
    pub fn with_color<R>(&mut self, color: Color, f: impl FnOnce(&mut Self) -> R) -> R {
        self.colors.push(color);
        let out = f(self);
        self.colors.pop();
        out
    }

    // ── model transform ────────────────────────────────────────────────────

    #[inline]
    pub fn model_stack(&self) -> &ModelStack {
        &self.model
    }

    #[inline]
    pub fn model_stack_mut(&mut self) -> &mut ModelStack {
        &mut self.model
    }

    /// Runs `f` with `provider`'s matrix composed onto the model stack.
    pub fn with_model<R>(
        &mut self,
        provider: &impl ModelMatrixProvider,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.model.push(provider.model_matrix());
        let out = f(self);
        self.model.pop();
        out
    }

    // ── private helpers ────────────────────────────────────────────────────

    /// Loads (first use) and activates `name`.
    fn activate(&mut self, name: &str) -> Result<ShaderHandle<D>, CanvasError> {
        let shader = self.shaders.get_or_load(&mut self.device, name)?;
        shader.make_active(&mut self.device);
        Ok(shader)
    }

    fn mvp(&self, shape_local: Mat4) -> Mat4 {
        compose_mvp(self.projection, shape_local, self.model.current())
    }

    fn set(&mut self, shader: &ShaderHandle<D>, uniform: Uniform, value: UniformValue) {
        shader.set_uniform(&mut self.device, uniform, value);
    }

    fn set_matrix(&mut self, shader: &ShaderHandle<D>, uniform: Uniform, m: Mat4) {
        self.set(shader, uniform, UniformValue::Mat4(m.to_cols_array()));
    }

    fn set_color_uniform(&mut self, shader: &ShaderHandle<D>, color: Color) {
        self.set(shader, Uniform::Color, UniformValue::Vec4(color.to_array()));
    }

    fn textured(
        &mut self,
        texture: &dyn texture::Texture<D>,
        stream: VertexStream<'_>,
        shape_local: Mat4,
        tint: Color,
    ) -> Result<(), CanvasError> {
        let shader = self.activate(programs::TEXTURED)?;
        texture.bind(&mut self.device, self.config.texture_unit);

        let mvp = self.mvp(shape_local);
        self.set_matrix(&shader, Uniform::Mvp, mvp);
        let color = compose_tint(tint, self.color());
        self.set_color_uniform(&shader, color);
        self.set(&shader, Uniform::TexMap, UniformValue::Int(self.config.texture_unit as i32));

        draw_stream(&mut self.device, &shader, &stream, Topology::TriangleStrip)
    }

    /// Uniform-color polyline / polygon through the simple program.
    fn simple_path(
        &mut self,
        points: &[PointF],
        line_width: f32,
        color: Color,
        topology: Topology,
    ) -> Result<(), CanvasError> {
        let shader = self.activate(programs::SIMPLE)?;
        let mvp = self.mvp(Mat4::IDENTITY);
        self.set_matrix(&shader, Uniform::Mvp, mvp);
        self.set_color_uniform(&shader, color);
        self.device.line_width(line_width);

        draw_stream(&mut self.device, &shader, &VertexStream::new(points), topology)
    }

    fn analytic_circle(
        &mut self,
        center: PointF,
        outer: f32,
        inner: f32,
        color: Color,
    ) -> Result<(), CanvasError> {
        let shader = self.activate(programs::CIRCLE)?;
        let mvp = self.mvp(Mat4::IDENTITY);
        self.set_matrix(&shader, Uniform::Mvp, mvp);
        self.set(&shader, Uniform::OuterRadius, UniformValue::Float(outer));
        self.set(&shader, Uniform::InnerRadius, UniformValue::Float(inner));
        self.set_color_uniform(&shader, color);

        let position = [center];
        draw_stream(&mut self.device, &shader, &VertexStream::new(&position[..]), Topology::Points)
    }
}

impl<D: GraphicsDevice> Canvas for GlCanvas<D> {
    type Texture = dyn texture::Texture<D>;

    fn set_logical_dimensions(&mut self, width: u32, height: u32) {
        self.dims = Dimensions::new(width, height);
        self.projection = orthographic(self.dims);
        log::debug!("canvas dimensions set to {width}x{height}");
    }

    #[inline]
    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn blit_texture(
        &mut self,
        texture: &Self::Texture,
        src: Rect,
        rotation: f32,
        dst: impl Into<RectF>,
        tint: Color,
    ) -> Result<(), CanvasError> {
        let dst = dst.into();

        let tx1 = texture.normalized_coord_x(src.x);
        let ty1 = texture.normalized_coord_y(src.y);
        let tx2 = texture.normalized_coord_x(if src.w == 0 { texture.width() as i32 } else { src.x2() });
        let ty2 = texture.normalized_coord_y(if src.h == 0 { texture.height() as i32 } else { src.y2() });

        let stream = VertexStream::new(rect_strip(dst).to_vec())
            .with_texcoords(texcoord_strip(tx1, ty1, tx2, ty2).to_vec());

        self.textured(texture, stream, rotation_about(dst.mid(), rotation), tint)
    }

    fn blit_texture_vertices(
        &mut self,
        texture: &Self::Texture,
        vertices: &[VertexTexcoord],
        rotation: f32,
        tint: Color,
    ) -> Result<(), CanvasError> {
        let (positions, texcoords) = VertexTexcoord::split(vertices);
        let stream = VertexStream::new(positions).with_texcoords(texcoords);

        self.textured(texture, stream, rotation_about_origin(rotation), tint)
    }

    fn draw_solid_rect(
        &mut self,
        rect: impl Into<RectF>,
        fill: Color,
        stroke: Option<Color>,
        rotation: f32,
    ) -> Result<(), CanvasError> {
        let rect = rect.into();
        let shader = self.activate(programs::SIMPLE)?;
        let mvp = self.mvp(rotation_about(rect.mid(), rotation));
        self.set_matrix(&shader, Uniform::Mvp, mvp);

        // Fill and outline share one stream so neither draws unless both upload.
        let mut positions = rect_strip(rect).to_vec();
        let mut ranges = vec![DrawRange {
            topology: Topology::TriangleStrip,
            first: 0,
            count: 4,
            color: Some(fill),
        }];
        if let Some(stroke) = stroke {
            positions.extend_from_slice(&rect_outline(rect));
            ranges.push(DrawRange { topology: Topology::LineStrip, first: 4, count: 5, color: Some(stroke) });
            self.device.line_width(1.0);
        }

        draw_stream_ranges(&mut self.device, &shader, &VertexStream::new(positions), &ranges)
    }

    fn draw_hollow_rect(
        &mut self,
        rect: impl Into<RectF>,
        stroke: Color,
        rotation: f32,
    ) -> Result<(), CanvasError> {
        let rect = rect.into();
        let shader = self.activate(programs::SIMPLE)?;
        let mvp = self.mvp(rotation_about(rect.mid(), rotation));
        self.set_matrix(&shader, Uniform::Mvp, mvp);
        self.set_color_uniform(&shader, stroke);
        self.device.line_width(1.0);

        let outline = rect_outline(rect);
        draw_stream(&mut self.device, &shader, &VertexStream::new(&outline[..]), Topology::LineStrip)
    }

    fn draw_line(
        &mut self,
        p1: impl Into<PointF>,
        p2: impl Into<PointF>,
        color: Color,
    ) -> Result<(), CanvasError> {
        let shader = self.activate(programs::SIMPLE)?;
        let mvp = self.mvp(Mat4::IDENTITY);
        self.set_matrix(&shader, Uniform::Mvp, mvp);
        self.set_color_uniform(&shader, color);
        self.device.line_width(1.0);

        let segment = [p1.into(), p2.into()];
        draw_stream(&mut self.device, &shader, &VertexStream::new(&segment[..]), Topology::Lines)
    }

    fn draw_lines(&mut self, points: &[PointF], line_width: f32, color: Color) -> Result<(), CanvasError> {
        let shader = self.shaders.get_or_load(&mut self.device, programs::LINE_AA)?;
        if !(shader.has_attribute(Attribute::Position) && shader.has_attribute(Attribute::Normal)) {
            log::trace!("{}: no normal input, antialiased lines skipped", shader.name());
            return Ok(());
        }
        shader.make_active(&mut self.device);

        let model = self.model.current();
        let projection = self.projection;
        self.set_matrix(&shader, Uniform::ModelView, model);
        self.set_matrix(&shader, Uniform::Projection, projection);
        self.set(&shader, Uniform::Blur, UniformValue::Float(self.config.line_blur));
        self.set(&shader, Uniform::LineWidth, UniformValue::Float(line_width));
        self.set_color_uniform(&shader, color);

        let stream = antialiased_segments(points);
        draw_stream(&mut self.device, &shader, &stream, Topology::TriangleStrip)
    }

    fn draw_lines_colored(
        &mut self,
        points: &[PointF],
        line_width: f32,
        colors: &[Rgba8],
    ) -> Result<(), CanvasError> {
        if points.len() != colors.len() {
            return Err(CanvasError::LengthMismatch { vertices: points.len(), colors: colors.len() });
        }

        let shader = self.activate(programs::ATTR_COLOR)?;
        let mvp = self.mvp(Mat4::IDENTITY);
        self.set_matrix(&shader, Uniform::Mvp, mvp);
        self.set_color_uniform(&shader, Color::white());
        self.device.line_width(line_width);

        let stream = VertexStream::new(points).with_colors(colors);
        draw_stream(&mut self.device, &shader, &stream, Topology::Lines)
    }

    fn draw_line_strip(&mut self, points: &[PointF], line_width: f32, color: Color) -> Result<(), CanvasError> {
        self.simple_path(points, line_width, color, Topology::LineStrip)
    }

    fn draw_line_loop(&mut self, points: &[PointF], line_width: f32, color: Color) -> Result<(), CanvasError> {
        self.simple_path(points, line_width, color, Topology::LineLoop)
    }

    fn draw_polygon(&mut self, points: &[PointF], color: Color) -> Result<(), CanvasError> {
        self.simple_path(points, 1.0, color, Topology::Polygon)
    }

    fn draw_solid_circle(
        &mut self,
        center: impl Into<PointF>,
        radius: f32,
        color: Color,
    ) -> Result<(), CanvasError> {
        self.analytic_circle(center.into(), radius, 0.0, color)
    }

    fn draw_solid_circle_colored(
        &mut self,
        center: impl Into<PointF>,
        radius: f32,
        colors: &[Rgba8],
    ) -> Result<(), CanvasError> {
        let center = center.into();
        let fan = circle_fan(radius, colors.len(), self.config.circle_step_multiplier);
        if fan.is_empty() {
            log::trace!("colored circle with {} colors has no fan, nothing drawn", colors.len());
            return Ok(());
        }
        let fan_colors: Vec<Rgba8> = (0..fan.len()).map(|i| colors[i % colors.len()]).collect();

        let shader = self.activate(programs::ATTR_COLOR)?;
        let mvp = self.mvp(Mat4::from_translation(Vec3::new(center.x, center.y, 0.0)));
        self.set_matrix(&shader, Uniform::Mvp, mvp);
        self.set_color_uniform(&shader, Color::white());

        let stream = VertexStream::new(fan).with_colors(fan_colors);
        draw_stream(&mut self.device, &shader, &stream, Topology::TriangleFan)
    }

    fn draw_hollow_circle(
        &mut self,
        center: impl Into<PointF>,
        radius: f32,
        color: Color,
    ) -> Result<(), CanvasError> {
        let inner = radius - self.config.hollow_circle_stroke;
        self.analytic_circle(center.into(), radius, inner, color)
    }

    fn draw_points(&mut self, points: &[PointF], point_radius: f32, color: Color) -> Result<(), CanvasError> {
        let shader = self.activate(programs::SIMPLE)?;
        let mvp = self.mvp(Mat4::IDENTITY);
        self.set_matrix(&shader, Uniform::Mvp, mvp);
        self.set(&shader, Uniform::PointSize, UniformValue::Float(point_radius));
        self.set_color_uniform(&shader, color);
        self.device.line_width(1.0);

        draw_stream(&mut self.device, &shader, &VertexStream::new(points), Topology::Points)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;
    use crate::device::{Command, RecordedAttribute, RecordingDevice};
    use crate::shader::ShaderSource;
    use crate::texture::TextureRef;

    fn canvas() -> GlCanvas<RecordingDevice> {
        GlCanvas::new(RecordingDevice::new(), Dimensions::new(800, 600), CanvasConfig::default())
    }

    fn mat(value: Option<UniformValue>) -> Mat4 {
        match value {
            Some(UniformValue::Mat4(cols)) => Mat4::from_cols_array(&cols),
            other => panic!("expected a matrix uniform, got {other:?}"),
        }
    }

    fn ndc(m: Mat4, x: f32, y: f32) -> (f32, f32) {
        let v = m * Vec4::new(x, y, 0.0, 1.0);
        (v.x, v.y)
    }

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-5 && (a.1 - b.1).abs() < 1e-5
    }

    fn positions(c: &GlCanvas<RecordingDevice>) -> Vec<PointF> {
        match c.device().last_attribute(0) {
            Some(RecordedAttribute::Float2(v)) => v.clone(),
            other => panic!("expected positions, got {other:?}"),
        }
    }

    /// Every enable is matched by a disable of the same location, and nothing
    /// stays enabled.
    fn assert_balanced(dev: &RecordingDevice) {
        let mut open: Vec<u32> = Vec::new();
        for cmd in dev.commands() {
            match cmd {
                Command::EnableAttribute(l) => open.push(*l),
                Command::DisableAttribute(l) => {
                    let pos = open.iter().position(|o| o == l).expect("disable without enable");
                    open.remove(pos);
                }
                _ => {}
            }
        }
        assert!(open.is_empty(), "left enabled: {open:?}");
        assert!(dev.enabled_attributes().is_empty());
    }

    // ── projection ─────────────────────────────────────────────────────────

    #[test]
    fn projection_maps_corners_to_clip_space() {
        let mut c = canvas();
        c.draw_line((0.0, 0.0), (1.0, 1.0), Color::white()).unwrap();
        let mvp = mat(c.device().last_uniform("u_mvp"));
        assert!(close(ndc(mvp, 0.0, 0.0), (-1.0, 1.0)));
        assert!(close(ndc(mvp, 800.0, 600.0), (1.0, -1.0)));
    }

    #[test]
    fn set_logical_dimensions_applies_to_next_draw() {
        let mut c = canvas();
        c.set_logical_dimensions(400, 200);
        assert_eq!(c.dimensions(), Dimensions::new(400, 200));

        c.draw_line((0.0, 0.0), (1.0, 1.0), Color::white()).unwrap();
        let mvp = mat(c.device().last_uniform("u_mvp"));
        assert!(close(ndc(mvp, 400.0, 200.0), (1.0, -1.0)));
    }

    // ── rects ──────────────────────────────────────────────────────────────

    #[test]
    fn solid_rect_emits_corners_in_strip_order() {
        let mut c = canvas();
        c.draw_solid_rect(RectF::new(10.0, 20.0, 100.0, 50.0), Color::black(), None, 0.0)
            .unwrap();

        assert_eq!(c.device().draws(), vec![(Topology::TriangleStrip, 0, 4)]);
        assert_eq!(
            positions(&c),
            vec![
                PointF::new(10.0, 20.0),
                PointF::new(110.0, 20.0),
                PointF::new(10.0, 70.0),
                PointF::new(110.0, 70.0),
            ]
        );

        // Without rotation the bound matrix is the projection alone.
        let mvp = mat(c.device().last_uniform("u_mvp"));
        assert!(mvp.abs_diff_eq(orthographic(Dimensions::new(800, 600)), 1e-6));
        let to_clip = |x: f32, y: f32| (x / 400.0 - 1.0, 1.0 - y / 300.0);
        for p in positions(&c) {
            assert!(close(ndc(mvp, p.x, p.y), to_clip(p.x, p.y)), "{p:?}");
        }
        assert_balanced(c.device());
    }

    #[test]
    fn stroked_rect_draws_fill_then_outline() {
        let mut c = canvas();
        let stroke = Color::rgb(1.0, 0.0, 0.0);
        c.draw_solid_rect(Rect::new(0, 0, 10, 10), Color::white(), Some(stroke), 0.0)
            .unwrap();

        assert_eq!(
            c.device().draws(),
            vec![(Topology::TriangleStrip, 0, 4), (Topology::LineStrip, 4, 5)]
        );
        assert_eq!(positions(&c).len(), 9);
        assert_eq!(positions(&c)[4..], rect_outline(RectF::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(c.device().last_uniform("u_color"), Some(UniformValue::Vec4(stroke.to_array())));
        assert_eq!(c.device().last_line_width(), Some(1.0));
        assert_balanced(c.device());
    }

    #[test]
    fn stroked_rect_upload_failure_draws_neither_part() {
        let mut dev = RecordingDevice::new();
        dev.fail_attribute_pointer();
        let mut c = GlCanvas::new(dev, Dimensions::new(800, 600), CanvasConfig::default());

        let err = c
            .draw_solid_rect(Rect::new(0, 0, 10, 10), Color::white(), Some(Color::black()), 0.0)
            .unwrap_err();
        assert!(matches!(err, CanvasError::Device(_)));
        assert!(c.device().draws().is_empty());
        assert_balanced(c.device());
    }

    #[test]
    fn rotated_rect_turns_about_its_center() {
        let mut c = canvas();
        c.draw_hollow_rect(RectF::new(100.0, 100.0, 40.0, 20.0), Color::white(), std::f32::consts::PI)
            .unwrap();

        let mvp = mat(c.device().last_uniform("u_mvp"));
        let projection = orthographic(Dimensions::new(800, 600));
        // Half a turn swaps the top-left and bottom-right corners.
        assert!(close(ndc(mvp, 100.0, 100.0), ndc(projection, 140.0, 120.0)));
        assert!(close(ndc(mvp, 120.0, 110.0), ndc(projection, 120.0, 110.0)));
        assert_eq!(c.device().draws(), vec![(Topology::LineStrip, 0, 5)]);
    }

    // ── textures ───────────────────────────────────────────────────────────

    #[test]
    fn zero_width_source_spans_full_texture() {
        let mut c = canvas();
        let tex = TextureRef::new(3u32, 64, 32);
        c.blit_texture(&tex, Rect::new(16, 8, 0, 0), 0.0, RectF::new(0.0, 0.0, 64.0, 32.0), Color::white())
            .unwrap();

        let dev = c.device();
        assert!(dev.commands().contains(&Command::BindTexture { unit: 0, texture: 3 }));
        assert_eq!(dev.last_uniform("u_tex_map"), Some(UniformValue::Int(0)));
        assert_eq!(
            dev.last_attribute(1),
            Some(&RecordedAttribute::Float2(vec![
                PointF::new(0.25, 0.25),
                PointF::new(1.0, 0.25),
                PointF::new(0.25, 1.0),
                PointF::new(1.0, 1.0),
            ]))
        );
        assert_eq!(dev.draws(), vec![(Topology::TriangleStrip, 0, 4)]);
        assert_balanced(dev);
    }

    #[test]
    fn explicit_source_region_normalizes_against_texture() {
        let mut c = canvas();
        let tex = TextureRef::new(1u32, 100, 50);
        c.blit_texture(&tex, Rect::new(0, 0, 50, 25), 0.0, Rect::new(0, 0, 10, 10), Color::white())
            .unwrap();

        match c.device().last_attribute(1) {
            Some(RecordedAttribute::Float2(tc)) => assert_eq!(tc[3], PointF::new(0.5, 0.5)),
            other => panic!("expected texcoords, got {other:?}"),
        }
    }

    #[test]
    fn white_tint_passes_ambient_color_through() {
        let mut c = canvas();
        let tex = TextureRef::new(1u32, 8, 8);
        let ambient = Color::new(0.5, 0.5, 0.5, 1.0);
        c.set_color(ambient);

        c.blit_texture(&tex, Rect::new(0, 0, 0, 0), 0.0, Rect::new(0, 0, 8, 8), Color::white())
            .unwrap();
        assert_eq!(c.device().last_uniform("u_color"), Some(UniformValue::Vec4(ambient.to_array())));

        let tint = Color::new(1.0, 0.0, 0.0, 1.0);
        c.blit_texture(&tex, Rect::new(0, 0, 0, 0), 0.0, Rect::new(0, 0, 8, 8), tint)
            .unwrap();
        assert_eq!(
            c.device().last_uniform("u_color"),
            Some(UniformValue::Vec4((tint * ambient).to_array()))
        );
    }

    #[test]
    fn ambient_color_scope_restores_previous() {
        let mut c = canvas();
        let inner = Color::rgb(0.0, 1.0, 0.0);
        let seen = c.with_color(inner, |c| c.color());
        assert_eq!(seen, inner);
        assert_eq!(c.color(), Color::white());
    }

    #[test]
    fn vertex_blit_rotates_about_origin() {
        let mut c = canvas();
        let tex = TextureRef::new(1u32, 8, 8);
        let verts = [
            VertexTexcoord::new(PointF::new(10.0, 0.0), PointF::new(0.0, 0.0)),
            VertexTexcoord::new(PointF::new(20.0, 0.0), PointF::new(1.0, 0.0)),
            VertexTexcoord::new(PointF::new(10.0, 10.0), PointF::new(0.0, 1.0)),
        ];
        c.blit_texture_vertices(&tex, &verts, std::f32::consts::FRAC_PI_2, Color::white())
            .unwrap();

        let mvp = mat(c.device().last_uniform("u_mvp"));
        let projection = orthographic(Dimensions::new(800, 600));
        assert!(close(ndc(mvp, 10.0, 0.0), ndc(projection, 0.0, 10.0)));
        assert_eq!(c.device().draws(), vec![(Topology::TriangleStrip, 0, 3)]);
        assert_balanced(c.device());
    }

    // ── lines ──────────────────────────────────────────────────────────────

    #[test]
    fn antialiased_lines_expand_segments_and_bind_blur() {
        let mut c = canvas();
        let pts = [
            PointF::new(0.0, 0.0),
            PointF::new(10.0, 0.0),
            PointF::new(0.0, 5.0),
            PointF::new(0.0, 15.0),
        ];
        c.draw_lines(&pts, 3.0, Color::white()).unwrap();

        let dev = c.device();
        assert_eq!(dev.draws(), vec![(Topology::TriangleStrip, 0, 8)]);
        assert_eq!(dev.last_uniform("u_blur"), Some(UniformValue::Float(2.0)));
        assert_eq!(dev.last_uniform("u_line_width"), Some(UniformValue::Float(3.0)));
        assert_eq!(mat(dev.last_uniform("mv_matrix")), Mat4::IDENTITY);
        assert_eq!(mat(dev.last_uniform("p_matrix")), orthographic(Dimensions::new(800, 600)));
        assert_balanced(dev);
    }

    #[test]
    fn antialiased_lines_without_normal_input_draw_nothing() {
        let mut shaders = ShaderProgramRegistry::new();
        let simple = ShaderSource::builtin(programs::SIMPLE).unwrap();
        shaders.declare(programs::LINE_AA, simple);
        let mut c = GlCanvas::with_shaders(
            RecordingDevice::new(),
            shaders,
            Dimensions::new(800, 600),
            CanvasConfig::default(),
        );

        c.draw_lines(&[PointF::new(0.0, 0.0), PointF::new(1.0, 1.0)], 1.0, Color::white())
            .unwrap();
        assert!(c.device().draws().is_empty());
        assert!(!c.device().commands().iter().any(|cmd| matches!(cmd, Command::EnableAttribute(_))));
    }

    #[test]
    fn colored_lines_reject_mismatched_lengths() {
        let mut c = canvas();
        let pts = [PointF::new(0.0, 0.0), PointF::new(1.0, 1.0), PointF::new(2.0, 2.0)];
        let colors = [Rgba8::opaque(255, 0, 0), Rgba8::opaque(0, 255, 0)];

        let err = c.draw_lines_colored(&pts, 1.0, &colors).unwrap_err();
        assert_eq!(err, CanvasError::LengthMismatch { vertices: 3, colors: 2 });
        assert!(c.device().commands().is_empty());
    }

    #[test]
    fn colored_lines_stream_one_color_per_point() {
        let mut c = canvas();
        let pts = [PointF::new(0.0, 0.0), PointF::new(1.0, 1.0)];
        let colors = [Rgba8::opaque(255, 0, 0), Rgba8::opaque(0, 0, 255)];
        c.draw_lines_colored(&pts, 2.0, &colors).unwrap();

        let dev = c.device();
        assert_eq!(dev.draws(), vec![(Topology::Lines, 0, 2)]);
        assert_eq!(dev.last_attribute(1), Some(&RecordedAttribute::Rgba8(colors.to_vec())));
        assert_eq!(dev.last_uniform("u_color"), Some(UniformValue::Vec4([1.0; 4])));
        assert_eq!(dev.last_line_width(), Some(2.0));
        assert_balanced(dev);
    }

    #[test]
    fn paths_use_their_topologies() {
        let mut c = canvas();
        let pts = [PointF::new(0.0, 0.0), PointF::new(10.0, 0.0), PointF::new(10.0, 10.0)];
        c.draw_line_strip(&pts, 2.0, Color::white()).unwrap();
        c.draw_line_loop(&pts, 2.0, Color::white()).unwrap();
        c.draw_polygon(&pts, Color::white()).unwrap();

        assert_eq!(
            c.device().draws(),
            vec![
                (Topology::LineStrip, 0, 3),
                (Topology::LineLoop, 0, 3),
                (Topology::Polygon, 0, 3),
            ]
        );
        let widths: Vec<f32> = c
            .device()
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                Command::LineWidth(w) => Some(*w),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![2.0, 2.0, 1.0]);
        assert_balanced(c.device());
    }

    #[test]
    fn plain_line_width_reaches_the_device() {
        let mut c = canvas();
        let pts = [PointF::new(0.0, 0.0), PointF::new(10.0, 0.0)];
        c.draw_line_strip(&pts, 5.0, Color::white()).unwrap();
        assert_eq!(c.device().last_line_width(), Some(5.0));

        // The simple program has no width uniform for the value to vanish into.
        let simple = c
            .device()
            .commands()
            .iter()
            .find_map(|cmd| match cmd {
                Command::CompileProgram { name, program } if name == programs::SIMPLE => Some(*program),
                _ => None,
            })
            .unwrap();
        assert!(c.device().uniform_location(simple, "u_line_width").is_none());

        c.draw_line((0.0, 0.0), (1.0, 1.0), Color::white()).unwrap();
        assert_eq!(c.device().last_line_width(), Some(1.0));
    }

    #[test]
    fn empty_point_list_draws_nothing() {
        let mut c = canvas();
        c.draw_line_strip(&[], 1.0, Color::white()).unwrap();
        c.draw_points(&[], 2.0, Color::white()).unwrap();
        assert!(c.device().draws().is_empty());
        assert_balanced(c.device());
    }

    // ── circles & points ───────────────────────────────────────────────────

    #[test]
    fn solid_circle_is_one_point_sprite() {
        let mut c = canvas();
        c.draw_solid_circle((50.0, 60.0), 12.0, Color::white()).unwrap();

        let dev = c.device();
        assert_eq!(dev.draws(), vec![(Topology::Points, 0, 1)]);
        assert_eq!(dev.last_uniform("outer_radius"), Some(UniformValue::Float(12.0)));
        assert_eq!(dev.last_uniform("inner_radius"), Some(UniformValue::Float(0.0)));
        assert_eq!(positions(&c), vec![PointF::new(50.0, 60.0)]);
    }

    #[test]
    fn hollow_circle_leaves_configured_ring() {
        let mut c = canvas();
        c.draw_hollow_circle((0.0, 0.0), 10.0, Color::white()).unwrap();
        assert_eq!(c.device().last_uniform("inner_radius"), Some(UniformValue::Float(9.0)));
    }

    #[test]
    fn colored_circle_fan_follows_color_count() {
        let mut c = canvas();
        let colors: Vec<Rgba8> = (0..8).map(|i| Rgba8::opaque(i * 10, 0, 0)).collect();
        c.draw_solid_circle_colored((100.0, 100.0), 5.0, &colors).unwrap();

        let dev = c.device();
        assert_eq!(dev.draws(), vec![(Topology::TriangleFan, 0, 4)]);
        assert_eq!(
            dev.last_attribute(1),
            Some(&RecordedAttribute::Rgba8(colors[..4].to_vec()))
        );

        let mvp = mat(dev.last_uniform("u_mvp"));
        let projection = orthographic(Dimensions::new(800, 600));
        assert!(close(ndc(mvp, 0.0, 0.0), ndc(projection, 100.0, 100.0)));
        assert_balanced(dev);
    }

    #[test]
    fn colored_circle_without_colors_is_noop() {
        let mut c = canvas();
        c.draw_solid_circle_colored((0.0, 0.0), 5.0, &[]).unwrap();
        assert!(c.device().commands().is_empty());
    }

    #[test]
    fn points_set_sprite_size() {
        let mut c = canvas();
        c.draw_points(&[PointF::new(1.0, 1.0), PointF::new(2.0, 2.0)], 4.0, Color::white())
            .unwrap();
        assert_eq!(c.device().last_uniform("u_point_size"), Some(UniformValue::Float(4.0)));
        assert_eq!(c.device().draws(), vec![(Topology::Points, 0, 2)]);
    }

    // ── shaders & model ────────────────────────────────────────────────────

    #[test]
    fn programs_compile_once_across_draws() {
        let mut c = canvas();
        for _ in 0..3 {
            c.draw_line((0.0, 0.0), (1.0, 1.0), Color::white()).unwrap();
        }
        assert_eq!(c.device().compile_count(programs::SIMPLE), 1);
        assert_eq!(c.device().draws().len(), 3);
    }

    #[test]
    fn compile_failure_aborts_without_enabling_attributes() {
        let mut dev = RecordingDevice::new();
        dev.fail_compile(programs::CIRCLE);
        let mut c = GlCanvas::new(dev, Dimensions::new(800, 600), CanvasConfig::default());

        let err = c.draw_solid_circle((0.0, 0.0), 4.0, Color::white()).unwrap_err();
        assert!(matches!(err, CanvasError::Shader(_)));
        assert!(c.device().draws().is_empty());
        assert!(!c.device().commands().iter().any(|cmd| matches!(cmd, Command::EnableAttribute(_))));

        // Other programs still work.
        c.draw_line((0.0, 0.0), (1.0, 1.0), Color::white()).unwrap();
        assert_eq!(c.device().draws().len(), 1);
    }

    #[test]
    fn preload_compiles_every_builtin() {
        let mut c = canvas();
        c.preload().unwrap();
        for name in programs::BUILTIN {
            assert!(c.shaders().is_loaded(name), "{name} not loaded");
            assert_eq!(c.device().compile_count(name), 1);
        }
    }

    #[test]
    fn model_scope_applies_then_restores() {
        let mut c = canvas();
        let shift = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        c.with_model(&shift, |c| c.draw_line((0.0, 0.0), (1.0, 0.0), Color::white()))
            .unwrap();

        let mvp = mat(c.device().last_uniform("u_mvp"));
        let projection = orthographic(Dimensions::new(800, 600));
        assert!(close(ndc(mvp, 0.0, 0.0), ndc(projection, 5.0, 0.0)));
        assert_eq!(c.model_stack().current(), Mat4::IDENTITY);
    }
}
