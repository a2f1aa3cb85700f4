use trianglebin_engine::coords::{Rect, Vec2};
use trianglebin_engine::paint::Color;
use trianglebin_engine::scene::DrawList;
use trianglebin_engine::text::FontId;

/// Thin drawing API over a [`DrawList`].
///
/// Text calls are dropped when no font is loaded, so widgets never have to
/// check for one.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    font: Option<FontId>,
    font_size: f32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, font: Option<FontId>, font_size: f32) -> Self {
        Self { draw_list, font, font_size }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !rect.is_empty() {
            self.draw_list.push_rect(rect, color);
        }
    }

    /// One-pixel outline drawn inside `rect`.
    pub fn outline_rect(&mut self, rect: Rect, color: Color) {
        let Rect { origin: o, size: s } = rect;
        self.fill_rect(Rect::new(o.x, o.y, s.x, 1.0), color);
        self.fill_rect(Rect::new(o.x, o.y + s.y - 1.0, s.x, 1.0), color);
        self.fill_rect(Rect::new(o.x, o.y, 1.0, s.y), color);
        self.fill_rect(Rect::new(o.x + s.x - 1.0, o.y, 1.0, s.y), color);
    }

    /// Single line of text vertically centred in `rect`.
    pub fn text_in(&mut self, rect: Rect, text: impl Into<String>, color: Color) {
        let Some(font) = self.font else { return };
        let y = rect.origin.y + ((rect.size.y - self.font_size) * 0.5).max(0.0);
        self.draw_list
            .push_text(text, font, self.font_size, color, Vec2::new(rect.origin.x, y));
    }

    // ── clipping ──────────────────────────────────────────────────────────

    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_is_four_rects() {
        let mut list = DrawList::new();
        Painter::new(&mut list, None, 13.0).outline_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::transparent());
        assert_eq!(list.rects().count(), 4);
    }

    #[test]
    fn text_without_font_is_dropped() {
        let mut list = DrawList::new();
        Painter::new(&mut list, None, 13.0).text_in(Rect::new(0.0, 0.0, 100.0, 18.0), "hi", Color::transparent());
        assert!(list.is_empty());
    }

    #[test]
    fn empty_rects_are_skipped() {
        let mut list = DrawList::new();
        Painter::new(&mut list, None, 13.0).fill_rect(Rect::new(5.0, 5.0, 0.0, 3.0), Color::transparent());
        assert!(list.is_empty());
    }
}
