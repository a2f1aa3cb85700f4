use naga_oil::compose::{Composer, NagaModuleDescriptor, ShaderDefValue, ShaderType};
use thiserror::Error;

/// A shader def handed to the composer, e.g. `NUM_EXTRA_FLOATS = 7`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Define {
    pub name: &'static str,
    pub value: u32,
}

impl Define {
    pub fn new(name: &'static str, value: u32) -> Self {
        Self { name, value }
    }
}

/// One entry point of one source file, with its defs.
#[derive(Debug, Clone)]
pub struct CompileUnit {
    pub source_name: &'static str,
    pub source: &'static str,
    pub entry: &'static str,
    pub stage: naga::ShaderStage,
    pub defines: Vec<Define>,
}

/// A compiled program: the composed module, validated and written back out
/// as plain WGSL.
///
/// Identical units always produce identical programs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Program {
    pub source_name: &'static str,
    pub entry: &'static str,
    pub stage: naga::ShaderStage,
    pub wgsl: String,
}

#[derive(Debug, Clone, Error)]
pub enum CompileError {
    #[error("composing failed:\n{0}")]
    Compose(String),

    #[error("validation failed: {0}")]
    Validate(String),

    #[error("writing WGSL failed: {0}")]
    Emit(String),

    #[error("no {stage:?} entry point named `{entry}`")]
    MissingEntryPoint { entry: &'static str, stage: naga::ShaderStage },
}

/// Result of compiling one unit; warnings are reported even on failure.
#[derive(Debug)]
pub struct UnitOutput {
    pub program: Result<Program, CompileError>,
    pub warnings: Vec<String>,
}

pub fn compile_unit(unit: &CompileUnit) -> UnitOutput {
    let warnings = unit
        .defines
        .iter()
        .filter(|d| !unit.source.contains(d.name))
        .map(|d| format!("`{}` is defined but never used", d.name))
        .collect();

    UnitOutput { program: build(unit), warnings }
}

fn build(unit: &CompileUnit) -> Result<Program, CompileError> {
    let mut composer = Composer::default();
    let module = composer
        .make_naga_module(NagaModuleDescriptor {
            source: unit.source,
            file_path: unit.source_name,
            shader_type: ShaderType::Wgsl,
            shader_defs: unit
                .defines
                .iter()
                .map(|d| (d.name.to_string(), ShaderDefValue::UInt(d.value)))
                .collect(),
            ..Default::default()
        })
        .map_err(|err| CompileError::Compose(err.emit_to_string(&composer)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    let info = validator
        .validate(&module)
        .map_err(|err| CompileError::Validate(error_chain(&err)))?;

    let found = module
        .entry_points
        .iter()
        .any(|ep| ep.name == unit.entry && ep.stage == unit.stage);
    if !found {
        return Err(CompileError::MissingEntryPoint { entry: unit.entry, stage: unit.stage });
    }

    let wgsl = naga::back::wgsl::write_string(&module, &info, naga::back::wgsl::WriterFlags::empty())
        .map_err(|err| CompileError::Emit(err.to_string()))?;

    Ok(Program {
        source_name: unit.source_name,
        entry: unit.entry,
        stage: unit.stage,
        wgsl,
    })
}

/// `err` and its sources joined with `: `.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}
