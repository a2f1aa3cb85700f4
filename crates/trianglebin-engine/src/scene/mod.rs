//! Overlay draw stream.
//!
//! The debug UI records rectangles and text into a [`DrawList`] each frame;
//! the overlay renderers consume it after the blit pass. Items keep
//! insertion order and carry the clip rect active when they were pushed.

mod cmd;
mod list;

pub use cmd::{DrawCmd, FillRect, TextRun};
pub use list::{DrawItem, DrawList};
