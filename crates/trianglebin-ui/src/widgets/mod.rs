//! Widgets, implemented as methods on [`Ui`](crate::Ui).
//!
//! Every widget takes a label, lays itself out in the next row of the panel
//! and returns `true` when it changed its value this frame.

pub mod label;
pub mod list_box;
pub mod slider;

pub use slider::value_at;
