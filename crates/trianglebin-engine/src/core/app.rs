use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;

use crate::device::Gpu;
use crate::fault::FaultReporter;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once the window and GPU exist, before the first frame.
    ///
    /// An error here ends the run loop with that error.
    fn on_start(&mut self, gpu: &Gpu<'_>, faults: &FaultReporter) -> anyhow::Result<()>;

    /// Called after the surface was reconfigured to `size` (physical pixels).
    ///
    /// Never called for zero-sized (minimised) windows.
    fn on_resize(&mut self, gpu: &Gpu<'_>, faults: &FaultReporter, size: PhysicalSize<u32>);

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
