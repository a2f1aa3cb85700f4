//! Colour representation shared by the UI and the overlay renderers.

mod color;

pub use color::Color;
