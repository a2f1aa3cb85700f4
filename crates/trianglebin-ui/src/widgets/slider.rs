use trianglebin_engine::coords::Rect;

use crate::context::Ui;
use crate::id::WidgetId;

/// Width reserved right of the track for the numeric readout.
const VALUE_WIDTH: f32 = 64.0;
const THUMB_WIDTH: f32 = 6.0;

/// Integer under pointer x-coordinate `x` on `track`, clamped to `[min, max]`.
pub fn value_at(track: Rect, x: f32, min: i32, max: i32) -> i32 {
    if track.size.x <= 0.0 || max <= min {
        return min;
    }
    let t = ((x - track.origin.x) / track.size.x).clamp(0.0, 1.0) as f64;
    let span = (max as f64) - (min as f64);
    (min as f64 + (t * span).round()) as i32
}

impl Ui<'_> {
    /// Horizontal integer slider.
    ///
    /// Pressing on the track captures the pointer; while held, the value
    /// follows the pointer even outside the track.
    pub fn slider_int(&mut self, label: &str, value: &mut i32, min: i32, max: i32) -> bool {
        let id = WidgetId::from_label(label);
        let row = self.next_row(self.ctx.style.row_height);
        let (label_rect, widget_rect) = row.split_left(self.ctx.style.label_width);
        let (track, readout) = widget_rect.split_left(widget_rect.size.x - VALUE_WIDTH);

        let input = self.ctx.input;
        if input.pressed && input.mouse_pos.is_some_and(|p| track.contains(p)) {
            log::trace!("slider {label:?} captured pointer");
            self.ctx.active = Some(id);
        }

        let mut changed = false;
        if self.ctx.active == Some(id) && input.mouse_down {
            if let Some(p) = input.mouse_pos {
                let new = value_at(track, p.x, min, max);
                if new != *value {
                    *value = new;
                    changed = true;
                }
            }
        }

        let hovered = self.hovered(track) || self.ctx.active == Some(id);
        let style = self.ctx.style.clone();
        let shown = (*value).clamp(min, max);
        let t = if max > min { (shown - min) as f32 / (max - min) as f32 } else { 0.0 };
        let thumb_x = track.origin.x + t * (track.size.x - THUMB_WIDTH).max(0.0);

        let mut painter = self.painter();
        painter.text_in(label_rect, label, style.text);
        painter.fill_rect(track, if hovered { style.item_hover } else { style.track });
        painter.fill_rect(
            Rect::new(track.origin.x, track.origin.y, thumb_x - track.origin.x, track.size.y),
            style.fill,
        );
        painter.fill_rect(Rect::new(thumb_x, track.origin.y, THUMB_WIDTH, track.size.y), style.thumb);
        painter.text_in(readout.split_left(style.padding).1, shown.to_string(), style.text);

        changed
    }
}

#[cfg(test)]
mod tests {
    use trianglebin_engine::coords::Vec2;

    use super::*;
    use crate::context::UiContext;
    use crate::input::UiInput;

    const PANEL: Rect = Rect::new(0.0, 0.0, 550.0, 250.0);

    fn pointer(x: f32, y: f32, down: bool, pressed: bool) -> UiInput {
        UiInput {
            mouse_pos: Some(Vec2::new(x, y)),
            mouse_down: down,
            pressed,
            released: false,
        }
    }

    /// Runs one frame with a single slider and returns (changed, value).
    fn frame(ui: &mut UiContext, input: UiInput, value: &mut i32) -> bool {
        ui.begin_frame(input);
        let changed = ui.panel("Toolbox", PANEL).slider_int("Num triangles", value, 0, 100);
        ui.end_frame();
        changed
    }

    fn track_y(ui: &UiContext) -> f32 {
        let s = ui.style();
        s.title_height + s.padding + s.row_height * 0.5
    }

    // ── value mapping ──────────────────────────────────────────────────────

    #[test]
    fn value_at_maps_ends_and_middle() {
        let track = Rect::new(100.0, 0.0, 200.0, 10.0);
        assert_eq!(value_at(track, 100.0, 0, 100), 0);
        assert_eq!(value_at(track, 200.0, 0, 100), 50);
        assert_eq!(value_at(track, 300.0, 0, 100), 100);
    }

    #[test]
    fn value_at_clamps_outside_track() {
        let track = Rect::new(100.0, 0.0, 200.0, 10.0);
        assert_eq!(value_at(track, -50.0, 0, 24), 0);
        assert_eq!(value_at(track, 900.0, 0, 24), 24);
    }

    #[test]
    fn value_at_handles_large_ranges() {
        let track = Rect::new(0.0, 0.0, 100.0, 10.0);
        assert_eq!(value_at(track, 100.0, 0, 50_000), 50_000);
        assert_eq!(value_at(track, 50.0, 0, 50_000), 25_000);
    }

    #[test]
    fn degenerate_track_or_range_yields_min() {
        assert_eq!(value_at(Rect::new(0.0, 0.0, 0.0, 10.0), 5.0, 3, 9), 3);
        assert_eq!(value_at(Rect::new(0.0, 0.0, 10.0, 10.0), 5.0, 7, 7), 7);
    }

    // ── interaction ───────────────────────────────────────────────────────

    #[test]
    fn press_on_track_sets_value_and_reports_change() {
        let mut ui = UiContext::default();
        let y = track_y(&ui);
        let track_right = PANEL.size.x - ui.style().padding - VALUE_WIDTH;
        let mut value = 0;

        assert!(frame(&mut ui, pointer(track_right - 1.0, y, true, true), &mut value));
        assert_eq!(value, 100);
    }

    #[test]
    fn drag_keeps_capture_outside_track_until_release() {
        let mut ui = UiContext::default();
        let y = track_y(&ui);
        let track_left = ui.style().padding + ui.style().label_width;
        let mut value = 50;

        frame(&mut ui, pointer(track_left + 10.0, y, true, true), &mut value);
        assert!(ui.active().is_some());

        // Dragged far left, off the track: clamps to min while captured.
        assert!(frame(&mut ui, pointer(0.0, y + 100.0, true, false), &mut value));
        assert_eq!(value, 0);

        // Released: capture ends, later moves do nothing.
        frame(&mut ui, UiInput { released: true, ..pointer(0.0, y, false, false) }, &mut value);
        assert!(ui.active().is_none());
        assert!(!frame(&mut ui, pointer(PANEL.size.x, y, false, false), &mut value));
        assert_eq!(value, 0);
    }

    #[test]
    fn press_outside_track_does_not_capture() {
        let mut ui = UiContext::default();
        let mut value = 7;
        assert!(!frame(&mut ui, pointer(5.0, 5.0, true, true), &mut value));
        assert_eq!(value, 7);
        assert!(ui.active().is_none());
    }

    #[test]
    fn unchanged_value_is_not_a_change() {
        let mut ui = UiContext::default();
        let y = track_y(&ui);
        let track_left = ui.style().padding + ui.style().label_width;
        let mut value = 0;
        assert!(!frame(&mut ui, pointer(track_left, y, true, true), &mut value));
        assert_eq!(value, 0);
    }
}
