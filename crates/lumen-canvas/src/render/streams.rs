use crate::device::{AttributeData, GraphicsDevice, Topology, UniformValue};
use crate::geometry::VertexStream;
use crate::paint::Color;
use crate::shader::{Attribute, ShaderHandle, Uniform};

use super::CanvasError;

/// One `draw_arrays` over a slice of a shared stream.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct DrawRange {
    pub topology: Topology,
    pub first: usize,
    pub count: usize,
    /// Color uniform to set before this draw, if it changes.
    pub color: Option<Color>,
}

/// Draws all of `stream` with the active `shader` as one `topology` draw.
pub(super) fn draw_stream<D: GraphicsDevice>(
    device: &mut D,
    shader: &ShaderHandle<D>,
    stream: &VertexStream<'_>,
    topology: Topology,
) -> Result<(), CanvasError> {
    let whole = DrawRange { topology, first: 0, count: stream.len(), color: None };
    draw_stream_ranges(device, shader, stream, &[whole])
}

/// Draws `ranges` of `stream` with the active `shader`, bracketing every
/// attribute it enables with a matching disable before returning (also on
/// error).
///
/// All attribute data is pointed before the first draw, so a failed upload
/// draws none of the ranges. Optional streams the program does not consume
/// are skipped. A program without a position input, or an empty stream,
/// draws nothing.
pub(super) fn draw_stream_ranges<D: GraphicsDevice>(
    device: &mut D,
    shader: &ShaderHandle<D>,
    stream: &VertexStream<'_>,
    ranges: &[DrawRange],
) -> Result<(), CanvasError> {
    if stream.is_empty() {
        log::trace!("{}: empty vertex stream, nothing drawn", shader.name());
        return Ok(());
    }
    let Some(position) = shader.attribute_location(Attribute::Position) else {
        log::trace!("{}: no position input, nothing drawn", shader.name());
        return Ok(());
    };

    let mut bindings: Vec<(u32, AttributeData<'_>)> = Vec::with_capacity(4);
    bindings.push((position, AttributeData::Float2(&stream.positions)));

    let optional = [
        (Attribute::TexCoord, stream.texcoords.as_deref().map(AttributeData::Float2)),
        (Attribute::Color, stream.colors.as_deref().map(AttributeData::Rgba8)),
        (Attribute::Normal, stream.normals.as_deref().map(AttributeData::Float2)),
    ];
    for (attribute, data) in optional {
        if let (Some(location), Some(data)) = (shader.attribute_location(attribute), data) {
            bindings.push((location, data));
        }
    }

    for &(location, _) in &bindings {
        device.enable_attribute(location);
    }

    let pointed = bindings
        .iter()
        .try_for_each(|&(location, data)| device.attribute_pointer(location, data));

    if pointed.is_ok() {
        for range in ranges {
            if let Some(color) = range.color {
                shader.set_uniform(device, Uniform::Color, UniformValue::Vec4(color.to_array()));
            }
            device.draw_arrays(range.topology, range.first, range.count);
        }
    }

    for &(location, _) in bindings.iter().rev() {
        device.disable_attribute(location);
    }

    pointed.map_err(CanvasError::from)
}
