//! Immediate-mode debug UI on top of `trianglebin-engine`.
//!
//! Widgets are plain method calls made every frame. Each call draws into the
//! context's [`DrawList`](trianglebin_engine::scene::DrawList), handles the
//! pointer for that frame and reports whether it changed the bound value.
//!
//! ```rust,ignore
//! ui.begin_frame(UiInput::from_engine(ctx.input, ctx.input_frame));
//! {
//!     let mut panel = ui.panel("Toolbox", Rect::new(0.0, 0.0, 550.0, 250.0));
//!     if panel.slider_int("Num triangles", &mut count, 0, 100) {
//!         log::info!("count = {count}");
//!     }
//! }
//! ui.end_frame();
//! ```

pub mod context;
pub mod id;
pub mod input;
pub mod painter;
pub mod style;
pub mod widgets;

pub use context::{Ui, UiContext};
pub use id::WidgetId;
pub use input::UiInput;
pub use style::Style;
