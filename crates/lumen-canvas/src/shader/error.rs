use std::fmt;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A program could not be produced. No primitive can draw without its
/// program, so callers treat this as fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShaderError {
    #[error("no shader program named `{0}` is declared")]
    UnknownProgram(String),

    #[error("failed to create GL object for program `{program}`: {reason}")]
    Create { program: String, reason: String },

    #[error("{stage} stage of program `{program}` failed to compile:\n{log}")]
    Compile { program: String, stage: ShaderStage, log: String },

    #[error("program `{program}` failed to link:\n{log}")]
    Link { program: String, log: String },
}
