//! Overlay rendering.
//!
//! Renderers consume `scene` draw lists and draw on top of whatever the
//! surface view already holds. Geometry is in logical pixels; shaders convert
//! to NDC with a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
