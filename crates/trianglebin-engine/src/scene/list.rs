use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

use super::cmd::{DrawCmd, FillRect, TextRun};

/// A recorded command plus the clip rect active when it was pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping.
    pub clip_rect: Option<Rect>,
}

/// Recorded overlay draw stream for a frame.
///
/// Clip rects nest: [`push_clip`](Self::push_clip) intersects with the
/// current clip, [`pop_clip`](Self::pop_clip) restores it.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears items and the clip stack, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.clip_stack.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem {
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });
    }

    pub fn push_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Fill(FillRect { rect, color }));
    }

    pub fn push_text(&mut self, text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2) {
        self.push(DrawCmd::Text(TextRun { text: text.into(), font, size, color, origin }));
    }

    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap yields a zero-area clip; renderers skip those items.
            Some(&parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip without matching push_clip");
        self.clip_stack.pop();
    }

    /// Rectangles in insertion order.
    pub fn rects(&self) -> impl Iterator<Item = (&FillRect, Option<Rect>)> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Fill(cmd) => Some((cmd, item.clip_rect)),
            DrawCmd::Text(_) => None,
        })
    }

    /// Text runs in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = (&TextRun, Option<Rect>)> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Text(cmd) => Some((cmd, item.clip_rect)),
            DrawCmd::Fill(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> FontId {
        FontId(0)
    }

    #[test]
    fn items_keep_insertion_order() {
        let mut list = DrawList::new();
        list.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::transparent());
        list.push_text("a", font(), 12.0, Color::transparent(), Vec2::ZERO);
        list.push_rect(Rect::new(1.0, 0.0, 1.0, 1.0), Color::transparent());

        assert_eq!(list.items().len(), 3);
        let xs: Vec<f32> = list.rects().map(|(r, _)| r.rect.origin.x).collect();
        assert_eq!(xs, vec![0.0, 1.0]);
        assert_eq!(list.texts().count(), 1);
    }

    #[test]
    fn clips_nest_by_intersection() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        list.push_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::transparent());
        list.pop_clip();
        list.push_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::transparent());
        list.pop_clip();
        list.push_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::transparent());

        let clips: Vec<Option<Rect>> = list.rects().map(|(_, c)| c).collect();
        assert_eq!(clips[0], Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(clips[1], Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(clips[2], None);
    }

    #[test]
    fn disjoint_clip_becomes_empty() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(20.0, 20.0, 10.0, 10.0));
        list.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::transparent());
        let (_, clip) = list.rects().next().unwrap();
        assert!(clip.unwrap().is_empty());
    }

    #[test]
    fn clear_resets_items_and_clips() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::transparent());
        list.clear();
        list.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::transparent());
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].clip_rect, None);
    }
}
