use trianglebin_engine::coords::{Rect, Vec2};
use trianglebin_engine::scene::DrawList;
use trianglebin_engine::text::{FontId, FontLoadError, FontSystem};

use crate::id::WidgetId;
use crate::input::UiInput;
use crate::painter::Painter;
use crate::style::Style;

/// State that outlives a frame: fonts, the draw list and the widget that
/// currently owns the pointer.
pub struct UiContext {
    pub(crate) draw_list: DrawList,
    fonts: FontSystem,
    pub(crate) font: Option<FontId>,
    pub(crate) style: Style,
    pub(crate) input: UiInput,
    pub(crate) active: Option<WidgetId>,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

impl UiContext {
    pub fn new(style: Style) -> Self {
        Self {
            draw_list: DrawList::new(),
            fonts: FontSystem::new(),
            font: None,
            style,
            input: UiInput::default(),
            active: None,
        }
    }

    /// Loads a font; the first one loaded becomes the UI font.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let id = self.fonts.load_font(bytes)?;
        self.font.get_or_insert(id);
        Ok(id)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Starts a frame: clears last frame's draw list and takes the input.
    pub fn begin_frame(&mut self, input: UiInput) {
        self.draw_list.clear();
        self.input = input;
    }

    /// Opens a titled panel at `rect`. Widgets stack top to bottom inside it.
    pub fn panel(&mut self, title: &str, rect: Rect) -> Ui<'_> {
        Ui::new(self, title, rect)
    }

    /// Ends the frame. Releasing the button releases the active widget.
    pub fn end_frame(&mut self) {
        if !self.input.mouse_down {
            self.active = None;
        }
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn fonts(&self) -> &FontSystem {
        &self.fonts
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Widget holding the pointer (e.g. a slider being dragged).
    pub fn active(&self) -> Option<WidgetId> {
        self.active
    }

    /// Whether the pointer is over a panel or captured by a widget.
    ///
    /// Set after the panels of this frame were laid out.
    pub fn wants_pointer(&self, panel: Rect) -> bool {
        self.active.is_some() || self.input.mouse_pos.is_some_and(|p| panel.contains(p))
    }
}

/// Layout cursor for one panel. Dropping it closes the panel's clip region.
pub struct Ui<'a> {
    pub(crate) ctx: &'a mut UiContext,
    content: Rect,
    cursor_y: f32,
}

impl<'a> Ui<'a> {
    fn new(ctx: &'a mut UiContext, title: &str, rect: Rect) -> Self {
        let style = &ctx.style;
        let title_bar = Rect::new(rect.origin.x, rect.origin.y, rect.size.x, style.title_height);
        let body = Rect::new(
            rect.origin.x,
            rect.origin.y + style.title_height,
            rect.size.x,
            (rect.size.y - style.title_height).max(0.0),
        );
        let content = body.shrink(style.padding);

        {
            let mut painter = Painter::new(&mut ctx.draw_list, ctx.font, style.font_size);
            painter.fill_rect(rect, style.panel_bg);
            painter.fill_rect(title_bar, style.title_bg);
            painter.text_in(title_bar.shrink(2.0).split_left(style.padding).1, title, style.text);
            painter.outline_rect(rect, style.border);
            painter.push_clip(content);
        }

        Self { ctx, content, cursor_y: content.origin.y }
    }

    /// Reserves the next row of height `h` across the content width.
    pub(crate) fn next_row(&mut self, h: f32) -> Rect {
        let row = Rect::new(self.content.origin.x, self.cursor_y, self.content.size.x, h);
        self.cursor_y += h + self.ctx.style.spacing;
        row
    }

    pub(crate) fn painter(&mut self) -> Painter<'_> {
        Painter::new(&mut self.ctx.draw_list, self.ctx.font, self.ctx.style.font_size)
    }

    pub(crate) fn hovered(&self, rect: Rect) -> bool {
        self.ctx.input.mouse_pos.is_some_and(|p| rect.contains(p))
    }

    /// Bottom-right of the space used so far.
    pub fn used(&self) -> Vec2 {
        Vec2::new(self.content.max().x, self.cursor_y)
    }
}

impl Drop for Ui<'_> {
    fn drop(&mut self) {
        self.ctx.draw_list.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_draws_background_and_closes_clip() {
        let mut ui = UiContext::default();
        ui.begin_frame(UiInput::default());
        {
            let _panel = ui.panel("Toolbox", Rect::new(0.0, 0.0, 550.0, 250.0));
        }
        ui.end_frame();

        // Background, title bar and a four-sided outline; no text without a font.
        assert_eq!(ui.draw_list().rects().count(), 6);
        assert!(ui.draw_list().rects().all(|(_, clip)| clip.is_none()));
    }

    #[test]
    fn begin_frame_clears_previous_draws() {
        let mut ui = UiContext::default();
        ui.begin_frame(UiInput::default());
        drop(ui.panel("A", Rect::new(0.0, 0.0, 100.0, 100.0)));
        ui.begin_frame(UiInput::default());
        assert!(ui.draw_list().is_empty());
    }

    #[test]
    fn rows_advance_by_height_and_spacing() {
        let mut ui = UiContext::default();
        let style = ui.style().clone();
        ui.begin_frame(UiInput::default());
        let mut panel = ui.panel("A", Rect::new(0.0, 0.0, 200.0, 200.0));
        let first = panel.next_row(10.0);
        let second = panel.next_row(10.0);
        assert_eq!(first.origin.y, style.title_height + style.padding);
        assert_eq!(second.origin.y - first.origin.y, 10.0 + style.spacing);
    }

    #[test]
    fn wants_pointer_inside_panel() {
        let mut ui = UiContext::default();
        ui.begin_frame(UiInput { mouse_pos: Some(Vec2::new(10.0, 10.0)), ..UiInput::default() });
        assert!(ui.wants_pointer(Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert!(!ui.wants_pointer(Rect::new(100.0, 100.0, 50.0, 50.0)));
    }
}
