use std::borrow::Cow;

/// Names of the programs every registry declares up front.
pub mod programs {
    /// Textured quad / arbitrary textured geometry.
    pub const TEXTURED: &str = "textured";
    /// Uniform color, position only.
    pub const SIMPLE: &str = "simple";
    /// Per-vertex color modulated by the uniform color.
    pub const ATTR_COLOR: &str = "attr_color";
    /// Point-sprite circle / ring with a signed-distance edge.
    pub const CIRCLE: &str = "circle";
    /// Segment quads with normals, distance-field antialiased.
    pub const LINE_AA: &str = "line_aa";

    pub const BUILTIN: [&str; 5] = [TEXTURED, SIMPLE, ATTR_COLOR, CIRCLE, LINE_AA];
}

/// GLSL source pair for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self { vertex: vertex.into(), fragment: fragment.into() }
    }

    /// Built-in source for one of [`programs::BUILTIN`].
    pub fn builtin(name: &str) -> Option<Self> {
        let (vs, fs) = match name {
            programs::TEXTURED => {
                (include_str!("glsl/textured.vert"), include_str!("glsl/textured.frag"))
            }
            programs::SIMPLE => (include_str!("glsl/simple.vert"), include_str!("glsl/simple.frag")),
            programs::ATTR_COLOR => {
                (include_str!("glsl/attr_color.vert"), include_str!("glsl/attr_color.frag"))
            }
            programs::CIRCLE => (include_str!("glsl/circle.vert"), include_str!("glsl/circle.frag")),
            programs::LINE_AA => {
                (include_str!("glsl/line_aa.vert"), include_str!("glsl/line_aa.frag"))
            }
            _ => return None,
        };
        Some(Self::new(vs, fs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_has_a_source() {
        for name in programs::BUILTIN {
            let src = ShaderSource::builtin(name).unwrap();
            assert!(src.vertex.contains("void main"), "{name} vertex");
            assert!(src.fragment.contains("void main"), "{name} fragment");
        }
    }

    #[test]
    fn unknown_name_has_no_builtin() {
        assert!(ShaderSource::builtin("nope").is_none());
    }
}
