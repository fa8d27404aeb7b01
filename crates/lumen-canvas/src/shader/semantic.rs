/// Uniforms the canvas binds, by meaning rather than by GLSL identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Uniform {
    /// Combined model-view-projection matrix.
    Mvp,
    /// Model-view matrix, for programs that take it apart from the projection.
    ModelView,
    Projection,
    /// Uniform color (or tint applied over per-vertex color).
    Color,
    /// Texture unit sampled by textured programs.
    TexMap,
    LineWidth,
    PointSize,
    OuterRadius,
    InnerRadius,
    /// Edge softness of the antialiased line distance field.
    Blur,
}

impl Uniform {
    pub const ALL: [Uniform; 10] = [
        Uniform::Mvp,
        Uniform::ModelView,
        Uniform::Projection,
        Uniform::Color,
        Uniform::TexMap,
        Uniform::LineWidth,
        Uniform::PointSize,
        Uniform::OuterRadius,
        Uniform::InnerRadius,
        Uniform::Blur,
    ];

    /// Identifier declared in GLSL.
    pub const fn glsl_name(self) -> &'static str {
        match self {
            Uniform::Mvp => "u_mvp",
            Uniform::ModelView => "mv_matrix",
            Uniform::Projection => "p_matrix",
            Uniform::Color => "u_color",
            Uniform::TexMap => "u_tex_map",
            Uniform::LineWidth => "u_line_width",
            Uniform::PointSize => "u_point_size",
            Uniform::OuterRadius => "outer_radius",
            Uniform::InnerRadius => "inner_radius",
            Uniform::Blur => "u_blur",
        }
    }
}

/// Per-vertex inputs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    Position,
    TexCoord,
    Color,
    Normal,
}

impl Attribute {
    pub const ALL: [Attribute; 4] =
        [Attribute::Position, Attribute::TexCoord, Attribute::Color, Attribute::Normal];

    pub const fn glsl_name(self) -> &'static str {
        match self {
            Attribute::Position => "a_position",
            Attribute::TexCoord => "a_texcoord",
            Attribute::Color => "a_color",
            Attribute::Normal => "a_normal",
        }
    }
}
