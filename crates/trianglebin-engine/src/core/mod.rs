//! Contracts between the runtime and the application.
//!
//! The runtime owns the window, the GPU and the input state; the
//! application only sees them through [`App`] callbacks and [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
