//! Fixed pipeline state, bind group layouts and the render pipeline cache.

mod cache;
mod state;

pub use cache::{PipelineError, PipelineKey, RenderPipelines};
pub use state::{
    blit_bgl_entries, create_blit_pass_state, create_triangle_pass_state, triangles_bgl_entries, PassLayouts,
    PassState, BUDGET_UBO_SIZE, COUNTER_SIZE,
};
