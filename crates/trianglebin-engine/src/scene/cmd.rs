use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

#[derive(Debug, Clone, PartialEq)]
pub struct FillRect {
    pub rect: Rect,
    pub color: Color,
}

/// One line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: FontId,
    /// Logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the line box.
    pub origin: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(FillRect),
    Text(TextRun),
}
