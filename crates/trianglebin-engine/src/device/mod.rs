//! GPU device + presentation surface.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and presenting them
//! - capturing device errors around resource creation

mod error;
mod frame;
mod gpu;
mod init;
mod scope;
mod surface;

pub use error::{DeviceError, GpuError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use scope::capture;
pub use surface::{choose_alpha_mode, choose_surface_format, classify_surface_error};
