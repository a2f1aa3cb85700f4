use trianglebin_engine::coords::Rect;

use crate::context::Ui;

impl Ui<'_> {
    /// Vertical list with one selected entry. Clicking an entry selects it.
    ///
    /// An out-of-range `selected` shows no selection until an entry is clicked.
    pub fn list_box(&mut self, label: &str, items: &[&str], selected: &mut usize) -> bool {
        let item_h = self.ctx.style.item_height;
        let row = self.next_row(item_h * items.len() as f32 + 2.0);
        let (label_rect, list_rect) = row.split_left(self.ctx.style.label_width);

        let input = self.ctx.input;
        let captured = self.ctx.active.is_some();
        let item_rect = |i: usize| {
            Rect::new(
                list_rect.origin.x + 1.0,
                list_rect.origin.y + 1.0 + i as f32 * item_h,
                (list_rect.size.x - 2.0).max(0.0),
                item_h,
            )
        };

        let mut changed = false;
        if input.pressed && !captured {
            if let Some(p) = input.mouse_pos {
                if let Some(i) = (0..items.len()).find(|&i| item_rect(i).contains(p)) {
                    if i != *selected {
                        log::trace!("list box {label:?} selected {:?}", items[i]);
                        *selected = i;
                        changed = true;
                    }
                }
            }
        }

        let hovered: Vec<bool> = (0..items.len()).map(|i| self.hovered(item_rect(i))).collect();
        let style = self.ctx.style.clone();
        let mut painter = self.painter();
        painter.text_in(Rect::new(label_rect.origin.x, label_rect.origin.y, label_rect.size.x, item_h + 2.0), label, style.text);
        painter.fill_rect(list_rect, style.track);
        for (i, item) in items.iter().enumerate() {
            let r = item_rect(i);
            if i == *selected {
                painter.fill_rect(r, style.item_selected);
            } else if hovered[i] {
                painter.fill_rect(r, style.item_hover);
            }
            painter.text_in(r.split_left(style.padding).1, *item, style.text);
        }
        painter.outline_rect(list_rect, style.border);

        changed
    }
}
