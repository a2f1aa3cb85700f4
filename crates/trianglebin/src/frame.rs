//! Per-frame orchestration.
//!
//! A frame walks `WaitingForSurface → ConfigUI → TrianglePass → Resolve →
//! BlitPass → Presented`. The decisions of each frame are captured in a
//! [`FramePlan`]; [`FrameRenderer`] owns the GPU resources and records the
//! passes.

use thiserror::Error;
use trianglebin_engine::device::{capture, DeviceError, Gpu};
use trianglebin_engine::render::{RenderCtx, RenderTarget};
use winit::dpi::PhysicalSize;

use crate::counter::PixelCounter;
use crate::params::{ParameterState, PixelFormat, SampleCount};
use crate::pipeline::{PassLayouts, PipelineError, PipelineKey, RenderPipelines};
use crate::shaders::{RebuildReport, ShaderError, ShaderProgramSet};
use crate::targets::{DeviceCaps, TargetDesc, TargetError, TargetManager};

pub use crate::targets::ResolveMode;

/// Vertices drawn by the blit pass.
pub const BLIT_VERTEX_COUNT: u32 = 3;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStage {
    WaitingForSurface,
    ConfigUI,
    TrianglePass,
    Resolve,
    BlitPass,
    Presented,
}

impl FrameStage {
    pub fn next(self) -> FrameStage {
        match self {
            FrameStage::WaitingForSurface => FrameStage::ConfigUI,
            FrameStage::ConfigUI => FrameStage::TrianglePass,
            FrameStage::TrianglePass => FrameStage::Resolve,
            FrameStage::Resolve => FrameStage::BlitPass,
            FrameStage::BlitPass => FrameStage::Presented,
            FrameStage::Presented => FrameStage::WaitingForSurface,
        }
    }
}

fn advance(stage: &mut FrameStage, to: FrameStage) {
    debug_assert_eq!(stage.next(), to, "frame stage out of order");
    log::trace!("frame stage {to:?}");
    *stage = to;
}

/// What one frame draws.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FramePlan {
    /// `triangle_count * 3`; no vertex or index buffers are bound.
    pub vertex_count: u32,
    /// Fragments the triangle pass may shade.
    pub pixel_limit: u32,
    pub clear: wgpu::Color,
    pub resolve: ResolveMode,
    pub blit_vertex_count: u32,
}

impl FramePlan {
    pub fn new(params: &ParameterState, samples: u32) -> Self {
        Self {
            vertex_count: params.triangle_count() * 3,
            pixel_limit: params.pixel_limit(),
            clear: wgpu::Color::TRANSPARENT,
            resolve: ResolveMode::for_samples(samples),
            blit_vertex_count: BLIT_VERTEX_COUNT,
        }
    }
}

/// Rebuilds required by a parameter change.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Reconfigure {
    pub shaders: bool,
    pub targets: bool,
}

impl Reconfigure {
    pub fn between(before: &ParameterState, after: &ParameterState) -> Self {
        Self {
            shaders: before.extra_vertex_floats() != after.extra_vertex_floats(),
            targets: before.pixel_format() != after.pixel_format()
                || before.sample_count() != after.sample_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.shaders && !self.targets
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RebuildStats {
    pub shader_rebuilds: u64,
    pub target_rebuilds: u64,
    pub resizes: u64,
}

/// Surface size and rebuild bookkeeping for the offscreen targets.
///
/// Decides what each rebuild asks for; the caller supplies the sample-count
/// lookup and the actual build, so no device is needed here.
#[derive(Debug, Clone)]
pub struct TargetTracker {
    size: PhysicalSize<u32>,
    applied: Option<(PixelFormat, SampleCount)>,
    stats: RebuildStats,
}

impl TargetTracker {
    pub fn new(size: PhysicalSize<u32>) -> Self {
        Self { size, applied: None, stats: RebuildStats::default() }
    }

    /// Last known surface size.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn stats(&self) -> RebuildStats {
        self.stats
    }

    /// Format and sample count of the live targets.
    pub fn applied(&self) -> Option<(PixelFormat, SampleCount)> {
        self.applied
    }

    pub fn record_shader_rebuild(&mut self) {
        self.stats.shader_rebuilds += 1;
    }

    /// Builds targets for `params` at the last known size.
    ///
    /// `snap` lowers the requested sample count to one the format supports.
    /// The lowered count reaches `params` only once `build` succeeds. On
    /// failure `params` goes back to the format and sample count of the
    /// live targets.
    pub fn rebuild<E>(
        &mut self,
        params: &mut ParameterState,
        snap: impl FnOnce(PixelFormat, SampleCount) -> SampleCount,
        build: impl FnOnce(PixelFormat, TargetDesc) -> Result<(), E>,
    ) -> Result<TargetDesc, E> {
        let format = params.pixel_format();
        let requested = params.sample_count();
        let samples = snap(format, requested);
        if samples != requested {
            log::warn!(
                "{} does not support {}x MSAA here, using {}x",
                format.label(),
                requested.count(),
                samples.count()
            );
        }

        let desc = TargetDesc::new(self.size.width, self.size.height, format.texture_format(), samples.count());
        match build(format, desc) {
            Ok(()) => {
                params.set_sample_count(samples);
                self.applied = Some((format, samples));
                self.stats.target_rebuilds += 1;
                Ok(desc)
            }
            Err(err) => {
                if let Some((format, samples)) = self.applied {
                    log::warn!("target rebuild failed, back to {} {}", format.label(), samples.label());
                    params.set_pixel_format_index(format.index() as i64);
                    params.set_sample_count(samples);
                }
                Err(err)
            }
        }
    }

    /// Records a new surface size and rebuilds, even when it is unchanged.
    pub fn resize<E>(
        &mut self,
        size: PhysicalSize<u32>,
        params: &mut ParameterState,
        snap: impl FnOnce(PixelFormat, SampleCount) -> SampleCount,
        build: impl FnOnce(PixelFormat, TargetDesc) -> Result<(), E>,
    ) -> Result<TargetDesc, E> {
        self.size = size;
        self.stats.resizes += 1;
        self.rebuild(params, snap, build)
    }
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("offscreen targets have not been created")]
    NoTargets,

    #[error("render pipelines are unavailable")]
    NoPipelines,
}

/// Owns the offscreen pipeline: shaders, layouts, targets, counter.
pub struct FrameRenderer {
    caps: DeviceCaps,
    layouts: PassLayouts,
    shaders: ShaderProgramSet,
    pipelines: RenderPipelines,
    targets: TargetManager,
    counter: PixelCounter,
    sampler: wgpu::Sampler,
    blit_bind_group: Option<(u64, wgpu::BindGroup)>,
    tracker: TargetTracker,
    stage: FrameStage,
}

impl FrameRenderer {
    /// Compiles the shader set and creates every resource for the current
    /// surface size.
    pub fn new(gpu: &Gpu<'_>, params: &mut ParameterState) -> Result<Self, FrameError> {
        let device = gpu.device();
        let caps = DeviceCaps::new(device.limits(), |format| gpu.format_features(format));

        let mut shaders = ShaderProgramSet::new();
        shaders.rebuild(params.extra_vertex_floats())?;

        let (layouts, counter, sampler) = capture(device, "pass state creation", || {
            let layouts = PassLayouts::new(device);
            let counter = PixelCounter::new(device, &layouts.triangles_bgl);
            let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("trianglebin blit sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Nearest,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            });
            (layouts, counter, sampler)
        })?;

        let mut renderer = Self {
            caps,
            layouts,
            shaders,
            pipelines: RenderPipelines::new(),
            targets: TargetManager::new(),
            counter,
            sampler,
            blit_bind_group: None,
            tracker: TargetTracker::new(gpu.size()),
            stage: FrameStage::Presented,
        };
        renderer.tracker.record_shader_rebuild();
        renderer.rebuild_targets(device, params)?;
        Ok(renderer)
    }

    pub fn stats(&self) -> RebuildStats {
        self.tracker.stats()
    }

    pub fn stage(&self) -> FrameStage {
        self.stage
    }

    /// Size the offscreen targets were last built for.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.tracker.size()
    }

    pub fn target_desc(&self) -> Option<TargetDesc> {
        self.targets.desc()
    }

    /// Recompiles all four programs for the current extra-float count.
    pub fn rebuild_shaders(&mut self, params: &ParameterState) -> Result<RebuildReport, ShaderError> {
        let report = self.shaders.rebuild(params.extra_vertex_floats())?;
        self.tracker.record_shader_rebuild();
        log::info!(
            "shaders rebuilt for {} extra vertex floats (rebuild #{})",
            params.extra_vertex_floats(),
            self.tracker.stats().shader_rebuilds
        );
        Ok(report)
    }

    /// Recreates the offscreen targets at the last known size.
    ///
    /// A sample count the format cannot use is lowered, and `params` is
    /// updated to the count actually used. On failure `params` is put back
    /// to what the live targets use.
    pub fn rebuild_targets(&mut self, device: &wgpu::Device, params: &mut ParameterState) -> Result<(), TargetError> {
        let Self { caps, targets, tracker, blit_bind_group, .. } = self;
        let caps = &*caps;
        *blit_bind_group = None;
        tracker.rebuild(
            params,
            |format, requested| caps.format(format).snap(requested),
            |format, desc| targets.rebuild(device, caps, format, desc),
        )?;
        log::debug!("rebuild stats: {:?}", tracker.stats());
        Ok(())
    }

    /// Rebuilds the targets for a new surface size, even when it is unchanged.
    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        params: &mut ParameterState,
        size: PhysicalSize<u32>,
    ) -> Result<(), TargetError> {
        let Self { caps, targets, tracker, blit_bind_group, .. } = self;
        let caps = &*caps;
        *blit_bind_group = None;
        tracker.resize(
            size,
            params,
            |format, requested| caps.format(format).snap(requested),
            |format, desc| targets.rebuild(device, caps, format, desc),
        )?;
        log::debug!("rebuild stats: {:?}", tracker.stats());
        Ok(())
    }

    /// Marks the start of a frame, before the surface is acquired.
    pub fn begin_frame(&mut self) {
        self.stage = FrameStage::WaitingForSurface;
    }

    /// The surface is ready and the panel is about to run.
    pub fn enter_config_ui(&mut self) {
        advance(&mut self.stage, FrameStage::ConfigUI);
    }

    /// Records the triangle, resolve and blit passes.
    ///
    /// Leaves the frame in `BlitPass` so the overlay can be composited
    /// before presenting.
    pub fn encode(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        params: &ParameterState,
    ) -> Result<FramePlan, FrameError> {
        let Some(targets) = self.targets.current() else {
            return Err(FrameError::NoTargets);
        };
        let desc = targets.desc();
        let plan = FramePlan::new(params, desc.samples);

        let key = PipelineKey {
            shader_generation: self.shaders.generation(),
            offscreen_format: desc.format,
            samples: desc.samples,
            surface_format: ctx.surface_format,
        };
        self.pipelines.ensure(ctx.device, &self.layouts, &self.shaders, key)?;
        let (Some(triangles), Some(blit)) = (self.pipelines.triangles(), self.pipelines.blit()) else {
            return Err(FrameError::NoPipelines);
        };

        let generation = self.targets.generation();
        if !matches!(&self.blit_bind_group, Some((g, _)) if *g == generation) {
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("trianglebin blit bind group"),
                layout: &self.layouts.blit_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(targets.resolve_view()),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            });
            self.blit_bind_group = Some((generation, bind_group));
        }
        let Some((_, blit_bind_group)) = &self.blit_bind_group else {
            return Err(FrameError::NoTargets);
        };

        advance(&mut self.stage, FrameStage::TrianglePass);
        self.counter.write_budget(ctx.queue, plan.pixel_limit);
        self.counter.reset(target.encoder);
        {
            let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trianglebin triangle pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: targets.ms_view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(plan.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            pass.set_pipeline(triangles);
            pass.set_bind_group(0, self.counter.bind_group(), &[]);
            pass.set_viewport(0.0, 0.0, desc.width as f32, desc.height as f32, 0.0, 1.0);
            pass.draw(0..plan.vertex_count, 0..1);
        }

        advance(&mut self.stage, FrameStage::Resolve);
        targets.encode_resolve(target.encoder);

        advance(&mut self.stage, FrameStage::BlitPass);
        {
            let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trianglebin blit pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            pass.set_pipeline(blit);
            pass.set_bind_group(0, blit_bind_group, &[]);
            pass.draw(0..plan.blit_vertex_count, 0..1);
        }

        Ok(plan)
    }

    /// Closes the frame after submission. False when the frame never
    /// reached the blit pass.
    pub fn end_frame(&mut self) -> bool {
        if self.stage == FrameStage::BlitPass {
            advance(&mut self.stage, FrameStage::Presented);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_cycle_back_to_waiting() {
        let mut stage = FrameStage::WaitingForSurface;
        let mut seen = vec![stage];
        for _ in 0..5 {
            stage = stage.next();
            seen.push(stage);
        }
        assert_eq!(
            seen,
            [
                FrameStage::WaitingForSurface,
                FrameStage::ConfigUI,
                FrameStage::TrianglePass,
                FrameStage::Resolve,
                FrameStage::BlitPass,
                FrameStage::Presented,
            ]
        );
        assert_eq!(stage.next(), FrameStage::WaitingForSurface);
    }

    #[test]
    fn advance_moves_forward() {
        let mut stage = FrameStage::Resolve;
        advance(&mut stage, FrameStage::BlitPass);
        assert_eq!(stage, FrameStage::BlitPass);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "frame stage out of order")]
    fn advance_rejects_skipped_stage() {
        let mut stage = FrameStage::ConfigUI;
        advance(&mut stage, FrameStage::BlitPass);
    }

    #[test]
    fn plan_clears_to_transparent_black() {
        let plan = FramePlan::new(&ParameterState::new(), 1);
        assert_eq!(plan.clear, wgpu::Color::TRANSPARENT);
        assert_eq!(plan.blit_vertex_count, 3);
    }

    #[test]
    fn plan_picks_resolve_mode_from_samples() {
        let params = ParameterState::new();
        assert_eq!(FramePlan::new(&params, 1).resolve, ResolveMode::Copy);
        assert_eq!(FramePlan::new(&params, 8).resolve, ResolveMode::Multisample);
    }

    #[test]
    fn unrelated_changes_need_no_rebuild() {
        let before = ParameterState::new();
        let mut after = before.clone();
        after.set_triangle_count(50);
        after.set_pixel_budget_thousands(10);
        assert!(Reconfigure::between(&before, &after).is_empty());
    }
}
