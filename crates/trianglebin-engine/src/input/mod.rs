//! Pointer input.
//!
//! The debug panel is the only consumer, so only pointer position, buttons
//! and focus are tracked. The runtime translates winit events into
//! `InputEvent`s; nothing here exposes winit types.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, MouseButton};
