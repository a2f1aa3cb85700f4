//! Shader program set.
//!
//! Two source files, four programs: the triangle pass (`triangles.wgsl`,
//! composed with the `NUM_EXTRA_FLOATS` shader def) and the blit pass
//! (`blit.wgsl`, no defs). Every rebuild compiles all four. When either
//! stage of a pass fails, the pass keeps its previous vertex/fragment pair.

mod compile;

pub use compile::{compile_unit, CompileError, CompileUnit, Define, Program, UnitOutput};

use thiserror::Error;

pub const TRIANGLES_WGSL: &str = include_str!("triangles.wgsl");
pub const BLIT_WGSL: &str = include_str!("blit.wgsl");

/// Shader def carrying the extra vertex float count into `triangles.wgsl`.
pub const NUM_EXTRA_FLOATS: &str = "NUM_EXTRA_FLOATS";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ProgramSlot {
    TrianglesVertex,
    TrianglesFragment,
    BlitVertex,
    BlitFragment,
}

impl ProgramSlot {
    pub const ALL: [ProgramSlot; 4] = [
        ProgramSlot::TrianglesVertex,
        ProgramSlot::TrianglesFragment,
        ProgramSlot::BlitVertex,
        ProgramSlot::BlitFragment,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The compilation unit that fills this slot.
    pub fn unit(self, extra_floats: u32) -> CompileUnit {
        let (source_name, source, defines) = match self {
            ProgramSlot::TrianglesVertex | ProgramSlot::TrianglesFragment => (
                "triangles.wgsl",
                TRIANGLES_WGSL,
                vec![Define::new(NUM_EXTRA_FLOATS, extra_floats)],
            ),
            ProgramSlot::BlitVertex | ProgramSlot::BlitFragment => ("blit.wgsl", BLIT_WGSL, Vec::new()),
        };
        let (entry, stage) = match self {
            ProgramSlot::TrianglesVertex | ProgramSlot::BlitVertex => ("vs_main", naga::ShaderStage::Vertex),
            ProgramSlot::TrianglesFragment | ProgramSlot::BlitFragment => ("fs_main", naga::ShaderStage::Fragment),
        };
        CompileUnit { source_name, source, entry, stage, defines }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ShaderError {
    #[error("shader programs unavailable for {0:?}: compilation failed and no previous program exists")]
    MissingProgram(Vec<ProgramSlot>),
}

/// What a successful rebuild did.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RebuildReport {
    /// Slots whose unit failed and which kept the previous program.
    pub stale: Vec<ProgramSlot>,
    pub warnings: usize,
}

/// Combines freshly compiled programs with the previous set, one pass
/// (vertex and fragment slot) at a time.
///
/// A pass whose stages all compiled takes the fresh pair. Otherwise it keeps
/// its previous pair whole, so both stages always share one interface.
/// Fails, listing the failed slots, when such a pass has no complete
/// previous pair.
pub fn merge_programs<T: Clone>(
    previous: &[Option<T>; 4],
    compiled: [Option<T>; 4],
) -> Result<([Option<T>; 4], Vec<ProgramSlot>), ShaderError> {
    let mut merged = compiled;
    let mut stale = Vec::new();
    let mut missing = Vec::new();

    for pass in [0..2, 2..4] {
        if merged[pass.clone()].iter().all(Option::is_some) {
            continue;
        }
        if previous[pass.clone()].iter().all(Option::is_some) {
            for i in pass {
                merged[i] = previous[i].clone();
                stale.push(ProgramSlot::ALL[i]);
            }
        } else {
            missing.extend(pass.filter(|&i| merged[i].is_none()).map(|i| ProgramSlot::ALL[i]));
        }
    }

    if missing.is_empty() {
        Ok((merged, stale))
    } else {
        Err(ShaderError::MissingProgram(missing))
    }
}

/// Owns the four compiled programs.
#[derive(Debug, Default)]
pub struct ShaderProgramSet {
    programs: [Option<Program>; 4],
    extra_floats: Option<u32>,
    generation: u64,
}

impl ShaderProgramSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles all four units for `extra_floats` and swaps the result in.
    ///
    /// Compile errors and warnings go to the log. On `Err` the set is left
    /// untouched.
    pub fn rebuild(&mut self, extra_floats: u32) -> Result<RebuildReport, ShaderError> {
        self.rebuild_with(extra_floats, compile_unit)
    }

    /// [`rebuild`](Self::rebuild) with a caller-supplied compiler.
    pub fn rebuild_with(
        &mut self,
        extra_floats: u32,
        mut compile: impl FnMut(&CompileUnit) -> UnitOutput,
    ) -> Result<RebuildReport, ShaderError> {
        let mut warnings = 0;
        let compiled: [Option<Program>; 4] = ProgramSlot::ALL.map(|slot| {
            let unit = slot.unit(extra_floats);
            let out = compile(&unit);
            for w in &out.warnings {
                log::warn!("Warning ({}:{}): {}", unit.source_name, unit.entry, w);
            }
            warnings += out.warnings.len();
            match out.program {
                Ok(program) => Some(program),
                Err(err) => {
                    log::error!("Error ({}:{}): {}", unit.source_name, unit.entry, err);
                    None
                }
            }
        });

        let (merged, stale) = merge_programs(&self.programs, compiled)?;
        if !stale.is_empty() {
            log::warn!("keeping previous programs for {stale:?}");
        }

        self.programs = merged;
        if !stale.contains(&ProgramSlot::TrianglesVertex) {
            self.extra_floats = Some(extra_floats);
        }
        self.generation += 1;
        log::debug!(
            "shader set rebuilt (generation {}, {extra_floats} extra floats)",
            self.generation
        );
        Ok(RebuildReport { stale, warnings })
    }

    pub fn program(&self, slot: ProgramSlot) -> Option<&Program> {
        self.programs[slot.index()].as_ref()
    }

    /// Extra-float count the current triangle programs were built with.
    pub fn extra_floats(&self) -> Option<u32> {
        self.extra_floats
    }

    /// Incremented by every successful rebuild; zero before the first.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_takes_fresh_programs() {
        let (merged, stale) = merge_programs(&[Some(1), Some(2), None, None], [Some(5), Some(6), Some(7), Some(8)]).unwrap();
        assert_eq!(merged, [Some(5), Some(6), Some(7), Some(8)]);
        assert!(stale.is_empty());
    }

    #[test]
    fn failed_fragment_keeps_the_previous_pair() {
        let (merged, stale) = merge_programs(&[Some(1), Some(2), Some(3), Some(4)], [Some(5), None, Some(7), Some(8)]).unwrap();
        // The fresh vertex stage is dropped with its failed fragment.
        assert_eq!(merged, [Some(1), Some(2), Some(7), Some(8)]);
        assert_eq!(stale, [ProgramSlot::TrianglesVertex, ProgramSlot::TrianglesFragment]);
    }

    #[test]
    fn failed_vertex_keeps_the_previous_pair() {
        let (merged, stale) = merge_programs(&[Some(1), Some(2), Some(3), Some(4)], [Some(5), Some(6), None, Some(8)]).unwrap();
        assert_eq!(merged, [Some(5), Some(6), Some(3), Some(4)]);
        assert_eq!(stale, [ProgramSlot::BlitVertex, ProgramSlot::BlitFragment]);
    }

    #[test]
    fn merge_fails_when_nothing_to_fall_back_to() {
        let err = merge_programs::<u8>(&[None, None, Some(3), None], [Some(1), None, None, None]).unwrap_err();
        assert_eq!(
            err,
            ShaderError::MissingProgram(vec![
                ProgramSlot::TrianglesFragment,
                ProgramSlot::BlitVertex,
                ProgramSlot::BlitFragment,
            ])
        );
    }

    #[test]
    fn only_triangle_units_get_the_macro() {
        for slot in ProgramSlot::ALL {
            let unit = slot.unit(12);
            let has_macro = unit.defines.iter().any(|d| d.name == NUM_EXTRA_FLOATS && d.value == 12);
            let is_triangles = matches!(slot, ProgramSlot::TrianglesVertex | ProgramSlot::TrianglesFragment);
            assert_eq!(has_macro, is_triangles, "{slot:?}");
            if !is_triangles {
                assert!(unit.defines.is_empty());
            }
        }
    }

    #[test]
    fn fresh_set_is_empty() {
        let set = ShaderProgramSet::new();
        assert_eq!(set.generation(), 0);
        assert!(ProgramSlot::ALL.iter().all(|&s| set.program(s).is_none()));
    }
}
