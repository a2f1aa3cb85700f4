use std::sync::Arc;

use anyhow::{Context, Result};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{choose_alpha_mode, choose_surface_format, classify_surface_error};
use super::{DeviceError, GpuError, GpuFrame, GpuInit, SurfaceErrorAction};
use crate::fault::FaultReporter;

/// Owns wgpu core objects and the surface configuration.
///
/// This is the presentation surface of the application:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - hands out one frame at a time and presents it
pub struct Gpu<'w> {
    /// Kept alive for the lifetime of the surface.
    #[allow(dead_code)]
    instance: wgpu::Instance,

    /// Surface bound to the window; `'w` ties it to the window borrow.
    surface: wgpu::Surface<'w>,

    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        if let Ok(handle) = window.window_handle() {
            log::debug!("window platform: {}", platform_name(&handle.as_raw()));
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trianglebin device"),
                required_features: init.features_for(adapter.features()),
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = choose_alpha_mode(&caps.alpha_modes, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);
        log::debug!(
            "surface configured: {}x{} {:?} {:?}",
            size.width,
            size.height,
            format,
            init.present_mode,
        );

        Ok(Gpu {
            instance,
            surface,
            adapter,
            device,
            queue,
            config,
            size,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    /// Capabilities of `format` on this device.
    ///
    /// Adapter-specific capabilities are only usable when the device was
    /// created with `TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES`; otherwise the
    /// guaranteed WebGPU set applies.
    pub fn format_features(&self, format: wgpu::TextureFormat) -> wgpu::TextureFormatFeatures {
        let features = self.device.features();
        if features.contains(wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES) {
            self.adapter.get_texture_format_features(format)
        } else {
            format.guaranteed_format_features(features)
        }
    }

    /// Routes device errors that no error scope caught, and device loss,
    /// through `faults`.
    pub fn report_errors_to(&self, faults: Arc<FaultReporter>) {
        let uncaptured = Arc::clone(&faults);
        self.device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
            let _ = crate::check!(uncaptured, Err::<(), _>(DeviceError::from_wgpu("an unscoped GPU call", &err)));
        }));
        self.device.set_device_lost_callback(move |reason, message| {
            // Dropping the device at shutdown also reports a loss.
            if matches!(reason, wgpu::DeviceLostReason::Destroyed) {
                return;
            }
            let _ = crate::check!(faults, Err::<(), _>(DeviceError::Lost(message)));
        });
    }

    /// Reconfigures the surface after a resize.
    ///
    /// A zero-sized (minimised) window only updates the stored size; the
    /// surface keeps its previous configuration until a real size arrives.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) -> Result<(), GpuError> {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return Ok(());
        }

        let max = self.device.limits().max_texture_dimension_2d;
        if new_size.width > max || new_size.height > max {
            return Err(GpuError::SurfaceTooLarge {
                width: new_size.width,
                height: new_size.height,
                max,
            });
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        Ok(())
    }

    /// Waits for the next surface texture and creates an encoder.
    ///
    /// Blocks while `desired_maximum_frame_latency` frames are in flight.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trianglebin frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, view, encoder } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action, reconfiguring
    /// the surface when it was lost or went stale.
    pub fn handle_surface_error(&mut self, err: &SurfaceError) -> SurfaceErrorAction {
        let action = classify_surface_error(err);
        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}

fn platform_name(handle: &RawWindowHandle) -> &'static str {
    match handle {
        RawWindowHandle::Win32(_) => "win32",
        RawWindowHandle::Xlib(_) => "xlib",
        RawWindowHandle::Xcb(_) => "xcb",
        RawWindowHandle::Wayland(_) => "wayland",
        RawWindowHandle::AppKit(_) => "appkit",
        _ => "other",
    }
}
