//! Font loading (fontdue). Glyphs are rasterized by the text renderer.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
