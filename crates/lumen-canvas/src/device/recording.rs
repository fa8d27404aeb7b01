use std::collections::{BTreeSet, HashSet};

use crate::coords::PointF;
use crate::paint::Rgba8;
use crate::shader::{ShaderError, ShaderSource, ShaderStage};

use super::{AttributeData, DeviceError, GraphicsDevice, Topology, UniformValue};

/// Uniform location handed out by [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordedUniform {
    pub program: u32,
    pub name: String,
}

/// Owned copy of the data passed to `attribute_pointer`.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedAttribute {
    Float2(Vec<PointF>),
    Rgba8(Vec<Rgba8>),
}

impl RecordedAttribute {
    pub fn len(&self) -> usize {
        match self {
            RecordedAttribute::Float2(v) => v.len(),
            RecordedAttribute::Rgba8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One recorded device call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CompileProgram { name: String, program: u32 },
    UseProgram(u32),
    SetUniform { location: RecordedUniform, value: UniformValue },
    BindTexture { unit: u32, texture: u32 },
    EnableAttribute(u32),
    DisableAttribute(u32),
    AttributePointer { location: u32, data: RecordedAttribute },
    LineWidth(f32),
    DrawArrays { topology: Topology, first: usize, count: usize },
}

#[derive(Debug, Clone)]
struct RecordedProgram {
    name: String,
    uniforms: Vec<String>,
    /// Active attributes with their declaration-order location.
    attributes: Vec<(String, u32)>,
}

/// Headless [`GraphicsDevice`] that records every call.
///
/// Program reflection is derived from the supplied GLSL the way a linker
/// reports active variables: `uniform <type> <name>;` in either stage is a
/// uniform and `in <type> <name>;` (or `attribute`) in the vertex stage is an
/// attribute, but only when some non-declaration line of the program reads
/// the name. Attributes are numbered in declaration order.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    commands: Vec<Command>,
    programs: Vec<RecordedProgram>,
    enabled: BTreeSet<u32>,
    failing: HashSet<String>,
    failing_pointer: bool,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later compile of `name` fail with a compile error.
    pub fn fail_compile(&mut self, name: impl Into<String>) {
        self.failing.insert(name.into());
    }

    #[inline]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drops recorded commands; compiled programs are kept.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Attribute locations currently enabled.
    pub fn enabled_attributes(&self) -> Vec<u32> {
        self.enabled.iter().copied().collect()
    }

    /// How many times a program with `name` was compiled.
    pub fn compile_count(&self, name: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::CompileProgram { name: n, .. } if n == name))
            .count()
    }

    /// Recorded draws as `(topology, first, count)`.
    pub fn draws(&self) -> Vec<(Topology, usize, usize)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::DrawArrays { topology, first, count } => Some((*topology, *first, *count)),
                _ => None,
            })
            .collect()
    }

    /// Name of the program with id `program`.
    pub fn program_name(&self, program: u32) -> Option<&str> {
        self.programs.get(program as usize).map(|p| p.name.as_str())
    }

    /// Last value written to the uniform called `name`.
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::SetUniform { location, value } if location.name == name => Some(*value),
            _ => None,
        })
    }

    /// Width most recently set for line rasterization.
    pub fn last_line_width(&self) -> Option<f32> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::LineWidth(w) => Some(*w),
            _ => None,
        })
    }

    /// Makes every later `attribute_pointer` fail.
    pub fn fail_attribute_pointer(&mut self) {
        self.failing_pointer = true;
    }

    /// Data most recently pointed at `location`.
    pub fn last_attribute(&self, location: u32) -> Option<&RecordedAttribute> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::AttributePointer { location: l, data } if *l == location => Some(data),
            _ => None,
        })
    }

    /// Data most recently pointed at the attribute called `name` of `program`.
    pub fn last_attribute_named(&self, program: u32, name: &str) -> Option<&RecordedAttribute> {
        let location = self.attribute_location(program, name)?;
        self.last_attribute(location)
    }
}

const DECLARATION_KEYWORDS: [&str; 4] = ["uniform", "in", "out", "attribute"];

fn is_declaration(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| line.starts_with(&format!("{k} ")))
}

fn declared_names(source: &str, keywords: &[&str]) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| is_declaration(line, keywords))
        .filter_map(|line| {
            let decl = line.split(';').next()?;
            let name = decl.split_whitespace().last()?;
            Some(name.split('[').next().unwrap_or(name).to_owned())
        })
        .collect()
}

/// Whether `name` appears as a whole identifier outside declarations.
fn is_read(name: &str, sources: &[&str]) -> bool {
    let ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    sources
        .iter()
        .flat_map(|src| src.lines())
        .map(str::trim)
        .filter(|line| !line.starts_with("//") && !is_declaration(line, &DECLARATION_KEYWORDS))
        .any(|line| {
            line.match_indices(name).any(|(at, _)| {
                let before = line[..at].chars().next_back();
                let after = line[at + name.len()..].chars().next();
                !before.is_some_and(ident) && !after.is_some_and(ident)
            })
        })
}

impl GraphicsDevice for RecordingDevice {
    type Program = u32;
    type UniformLocation = RecordedUniform;
    type Texture = u32;

    fn compile_program(
        &mut self,
        name: &str,
        source: &ShaderSource,
    ) -> Result<Self::Program, ShaderError> {
        if self.failing.contains(name) {
            return Err(ShaderError::Compile {
                program: name.to_owned(),
                stage: ShaderStage::Fragment,
                log: "recording device: forced failure".to_owned(),
            });
        }

        let stages = [source.vertex.as_ref(), source.fragment.as_ref()];
        let mut uniforms: Vec<String> = Vec::new();
        for u in declared_names(&source.vertex, &["uniform"])
            .into_iter()
            .chain(declared_names(&source.fragment, &["uniform"]))
        {
            if !uniforms.contains(&u) && is_read(&u, &stages) {
                uniforms.push(u);
            }
        }
        let attributes = declared_names(&source.vertex, &["in", "attribute"])
            .into_iter()
            .enumerate()
            .filter(|(_, a)| is_read(a, &stages[..1]))
            .map(|(i, a)| (a, i as u32))
            .collect();

        let program = self.programs.len() as u32;
        self.programs.push(RecordedProgram { name: name.to_owned(), uniforms, attributes });
        self.commands.push(Command::CompileProgram { name: name.to_owned(), program });
        Ok(program)
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        let p = self.programs.get(program as usize)?;
        p.uniforms
            .iter()
            .any(|u| u == name)
            .then(|| RecordedUniform { program, name: name.to_owned() })
    }

    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        let p = self.programs.get(program as usize)?;
        p.attributes.iter().find(|(a, _)| a == name).map(|&(_, loc)| loc)
    }

    fn use_program(&mut self, program: Self::Program) {
        self.commands.push(Command::UseProgram(program));
    }

    fn set_uniform(&mut self, location: &Self::UniformLocation, value: UniformValue) {
        self.commands.push(Command::SetUniform { location: location.clone(), value });
    }

    fn bind_texture(&mut self, unit: u32, texture: Self::Texture) {
        self.commands.push(Command::BindTexture { unit, texture });
    }

    fn enable_attribute(&mut self, location: u32) {
        self.enabled.insert(location);
        self.commands.push(Command::EnableAttribute(location));
    }

    fn disable_attribute(&mut self, location: u32) {
        self.enabled.remove(&location);
        self.commands.push(Command::DisableAttribute(location));
    }

    fn attribute_pointer(&mut self, location: u32, data: AttributeData<'_>) -> Result<(), DeviceError> {
        if self.failing_pointer {
            return Err(DeviceError::Create {
                what: "attribute buffer",
                reason: "recording device: forced failure".to_owned(),
            });
        }
        let data = match data {
            AttributeData::Float2(v) => RecordedAttribute::Float2(v.to_vec()),
            AttributeData::Rgba8(v) => RecordedAttribute::Rgba8(v.to_vec()),
        };
        self.commands.push(Command::AttributePointer { location, data });
        Ok(())
    }

    fn line_width(&mut self, width: f32) {
        self.commands.push(Command::LineWidth(width));
    }

    fn draw_arrays(&mut self, topology: Topology, first: usize, count: usize) {
        self.commands.push(Command::DrawArrays { topology, first, count });
    }
}
