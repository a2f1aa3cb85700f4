/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Logical viewport of a physical surface at `scale` physical px per logical px.
    #[inline]
    pub fn from_physical(width: u32, height: u32, scale: f32) -> Self {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        Self::new(width as f32 / scale, height as f32 / scale)
    }
}
