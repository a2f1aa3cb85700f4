use anyhow::Context;
use trianglebin_engine::check;
use trianglebin_engine::core::{App, AppControl, FrameCtx};
use trianglebin_engine::device::Gpu;
use trianglebin_engine::fault::FaultReporter;
use trianglebin_engine::render::shapes::rect::RectRenderer;
use trianglebin_engine::render::shapes::text::TextRenderer;
use trianglebin_ui::{UiContext, UiInput};
use winit::dpi::PhysicalSize;

use crate::frame::{FrameRenderer, Reconfigure};
use crate::panel::{toolbox, PanelStatus};
use crate::params::ParameterState;

/// The application: parameters, debug UI and the offscreen pipeline.
pub struct TrianglebinApp {
    params: ParameterState,
    ui: UiContext,
    renderer: Option<FrameRenderer>,
    rects: RectRenderer,
    text: TextRenderer,
}

impl TrianglebinApp {
    pub fn new(ui: UiContext) -> Self {
        Self {
            params: ParameterState::new(),
            ui,
            renderer: None,
            rects: RectRenderer::new(),
            text: TextRenderer::new(),
        }
    }

    pub fn params(&self) -> &ParameterState {
        &self.params
    }
}

impl App for TrianglebinApp {
    fn on_start(&mut self, gpu: &Gpu<'_>, _faults: &FaultReporter) -> anyhow::Result<()> {
        let renderer = FrameRenderer::new(gpu, &mut self.params).context("failed to create the render pipeline")?;
        log::info!(
            "render pipeline ready ({}x{}, surface {:?})",
            renderer.size().width,
            renderer.size().height,
            gpu.surface_format()
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_resize(&mut self, gpu: &Gpu<'_>, faults: &FaultReporter, size: PhysicalSize<u32>) {
        let Some(renderer) = self.renderer.as_mut() else { return };
        let _ = check!(faults, renderer.resize(gpu.device(), &mut self.params, size));
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self { params, ui, renderer, rects, text } = self;
        let Some(renderer) = renderer.as_mut() else {
            return AppControl::Continue;
        };

        let faults = ctx.faults;
        let input = UiInput::from_engine(ctx.input, ctx.input_frame);
        let time = ctx.time;

        renderer.begin_frame();
        let control = ctx.render(|rctx, target| {
            renderer.enter_config_ui();

            let before = params.clone();
            let status = PanelStatus {
                frame_ms: time.frame_ms(),
                fps: time.fps(),
                surface_size: rctx.surface_size,
                target: renderer.target_desc(),
                stats: renderer.stats(),
            };
            ui.begin_frame(input);
            toolbox(ui, params, &status);
            ui.end_frame();

            let change = Reconfigure::between(&before, params);
            if change.shaders {
                let _ = check!(faults, renderer.rebuild_shaders(params));
            }
            if change.targets {
                let _ = check!(faults, renderer.rebuild_targets(rctx.device, params));
            }

            if check!(faults, renderer.encode(rctx, target, params)).is_some() {
                rects.render(rctx, target, ui.draw_list());
                text.render(rctx, target, ui.draw_list(), ui.fonts());
            }
        });

        if !renderer.end_frame() {
            log::trace!("frame {} not presented", time.frame_index);
        }
        control
    }
}
