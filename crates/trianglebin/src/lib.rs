//! trianglebin: a GPU fill-rate test bench.
//!
//! Each frame draws a configurable number of full-target triangles into an
//! offscreen multisampled image. A GPU atomic counter caps the number of
//! shaded fragments. The image is resolved, blitted to the window and
//! overlaid with the "Toolbox" panel that edits the parameters live.

pub mod app;
pub mod config;
pub mod counter;
pub mod frame;
pub mod panel;
pub mod params;
pub mod pipeline;
pub mod shaders;
pub mod targets;

pub use app::TrianglebinApp;
pub use config::AppConfig;
pub use params::ParameterState;
