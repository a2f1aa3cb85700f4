use thiserror::Error;
use trianglebin_engine::device::{capture, DeviceError};

use crate::shaders::{Program, ProgramSlot, ShaderError, ShaderProgramSet};

use super::state::{PassLayouts, PassState};

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Everything a pipeline build depends on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PipelineKey {
    pub shader_generation: u64,
    pub offscreen_format: wgpu::TextureFormat,
    pub samples: u32,
    pub surface_format: wgpu::TextureFormat,
}

/// Triangle and blit pipelines, rebuilt together whenever the key changes.
#[derive(Default)]
pub struct RenderPipelines {
    key: Option<PipelineKey>,
    triangles: Option<wgpu::RenderPipeline>,
    blit: Option<wgpu::RenderPipeline>,
    builds: u64,
}

impl RenderPipelines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_current(&self, key: &PipelineKey) -> bool {
        self.key.as_ref() == Some(key) && self.triangles.is_some() && self.blit.is_some()
    }

    /// Builds both pipelines unless they already match `key`.
    ///
    /// Shader module and pipeline creation run inside device error scopes.
    /// On error no pipelines are left, so the next call tries again.
    pub fn ensure(
        &mut self,
        device: &wgpu::Device,
        layouts: &PassLayouts,
        shaders: &ShaderProgramSet,
        key: PipelineKey,
    ) -> Result<(), PipelineError> {
        if self.is_current(&key) {
            return Ok(());
        }

        let program = |slot| shaders.program(slot).ok_or_else(|| ShaderError::MissingProgram(vec![slot]));
        let tri_vs = program(ProgramSlot::TrianglesVertex)?;
        let tri_fs = program(ProgramSlot::TrianglesFragment)?;
        let blit_vs = program(ProgramSlot::BlitVertex)?;
        let blit_fs = program(ProgramSlot::BlitFragment)?;

        self.key = None;
        self.triangles = None;
        self.blit = None;
        let (triangles, blit) = capture(device, "render pipeline creation", || {
            let triangles = build(
                device,
                "trianglebin triangles pipeline",
                &layouts.triangles,
                &layouts.triangles_state,
                (tri_vs, tri_fs),
                key.offscreen_format,
                key.samples,
            );
            let blit = build(
                device,
                "trianglebin blit pipeline",
                &layouts.blit,
                &layouts.blit_state,
                (blit_vs, blit_fs),
                key.surface_format,
                1,
            );
            (triangles, blit)
        })?;

        self.triangles = Some(triangles);
        self.blit = Some(blit);
        self.key = Some(key);
        self.builds += 1;
        log::debug!("render pipelines built ({key:?})");
        Ok(())
    }

    pub fn triangles(&self) -> Option<&wgpu::RenderPipeline> {
        self.triangles.as_ref()
    }

    pub fn blit(&self) -> Option<&wgpu::RenderPipeline> {
        self.blit.as_ref()
    }

    pub fn builds(&self) -> u64 {
        self.builds
    }
}

fn module(device: &wgpu::Device, program: &Program) -> wgpu::ShaderModule {
    let label = format!("{}:{}", program.source_name, program.entry);
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(program.wgsl.as_str().into()),
    })
}

fn build(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    state: &PassState,
    (vs, fs): (&Program, &Program),
    format: wgpu::TextureFormat,
    samples: u32,
) -> wgpu::RenderPipeline {
    let vs_module = module(device, vs);
    let fs_module = module(device, fs);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &vs_module,
            entry_point: Some(vs.entry),
            compilation_options: Default::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &fs_module,
            entry_point: Some(fs.entry),
            compilation_options: Default::default(),
            targets: &[Some(state.color_target(format))],
        }),
        primitive: state.primitive,
        depth_stencil: state.depth_stencil.clone(),
        multisample: wgpu::MultisampleState {
            count: samples,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
        cache: None,
    })
}
