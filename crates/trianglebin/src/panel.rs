//! The "Toolbox" debug panel.

use trianglebin_engine::coords::Rect;
use trianglebin_ui::UiContext;
use winit::dpi::PhysicalSize;

use crate::frame::RebuildStats;
use crate::params::{
    ParameterState, PixelFormat, SampleCount, EXTRA_VERTEX_FLOATS_MAX, PIXEL_BUDGET_THOUSANDS_MAX,
    TRIANGLE_COUNT_MAX,
};
use crate::targets::TargetDesc;

pub const TOOLBOX_TITLE: &str = "Toolbox";
pub const TOOLBOX_RECT: Rect = Rect::new(0.0, 0.0, 550.0, 250.0);

/// Read-only values shown under the controls.
#[derive(Debug, Copy, Clone, Default)]
pub struct PanelStatus {
    pub frame_ms: f32,
    pub fps: f32,
    pub surface_size: PhysicalSize<u32>,
    pub target: Option<TargetDesc>,
    pub stats: RebuildStats,
}

/// Lays out the Toolbox and writes edits back into `params`.
///
/// Returns whether any parameter changed. Must run between
/// `UiContext::begin_frame` and `UiContext::end_frame`.
pub fn toolbox(ui: &mut UiContext, params: &mut ParameterState, status: &PanelStatus) -> bool {
    let mut panel = ui.panel(TOOLBOX_TITLE, TOOLBOX_RECT);
    let mut changed = false;

    let mut triangles = params.triangle_count() as i32;
    if panel.slider_int("Num triangles", &mut triangles, 0, TRIANGLE_COUNT_MAX as i32) {
        params.set_triangle_count(triangles.into());
        changed = true;
    }

    let mut budget = params.pixel_budget_thousands() as i32;
    if panel.slider_int("Num pixels (in thousands)", &mut budget, 0, PIXEL_BUDGET_THOUSANDS_MAX as i32) {
        params.set_pixel_budget_thousands(budget.into());
        changed = true;
    }

    let mut extra = params.extra_vertex_floats() as i32;
    if panel.slider_int("Num extra vertex floats", &mut extra, 0, EXTRA_VERTEX_FLOATS_MAX as i32) {
        params.set_extra_vertex_floats(extra.into());
        changed = true;
    }

    let formats = PixelFormat::ALL.map(PixelFormat::label);
    let mut format = params.pixel_format().index();
    if panel.list_box("Pixel format", &formats, &mut format) {
        params.set_pixel_format_index(format as i64);
        changed = true;
    }

    let samples = SampleCount::ALL.map(SampleCount::label);
    let mut sample = params.sample_count().index();
    if panel.list_box("Sample count", &samples, &mut sample) {
        params.set_sample_count_index(sample as i64);
        changed = true;
    }

    panel.label(format!("Frame: {:.2} ms ({:.0} fps)", status.frame_ms, status.fps));
    let target = match status.target {
        Some(t) => format!("{}x{} {:?} x{}", t.width, t.height, t.format, t.samples),
        None => "none".to_owned(),
    };
    panel.label(format!(
        "Surface: {}x{}   Target: {}",
        status.surface_size.width, status.surface_size.height, target
    ));
    let stats = status.stats;
    panel.label(format!(
        "Rebuilds: shaders {}, targets {}, resizes {}",
        stats.shader_rebuilds, stats.target_rebuilds, stats.resizes
    ));

    changed
}

#[cfg(test)]
mod tests {
    use trianglebin_engine::coords::Vec2;
    use trianglebin_ui::{Style, UiInput};

    use super::*;

    fn run(ui: &mut UiContext, params: &mut ParameterState, input: UiInput) -> bool {
        ui.begin_frame(input);
        let changed = toolbox(ui, params, &PanelStatus::default());
        ui.end_frame();
        changed
    }

    fn click(pos: Vec2) -> UiInput {
        UiInput { mouse_pos: Some(pos), mouse_down: true, pressed: true, released: false }
    }

    /// Centre of entry `i` of the sample-count list, from the style metrics.
    fn sample_item(style: &Style, i: usize) -> Vec2 {
        let content_y = TOOLBOX_RECT.origin.y + style.title_height + style.padding;
        let slider_rows = 3.0 * (style.row_height + style.spacing);
        let format_list = 2.0 * style.item_height + 2.0 + style.spacing;
        let list_y = content_y + slider_rows + format_list;
        let x = TOOLBOX_RECT.origin.x + style.padding + style.label_width + 40.0;
        Vec2::new(x, list_y + 1.0 + (i as f32 + 0.5) * style.item_height)
    }

    #[test]
    fn idle_frame_changes_nothing() {
        let mut ui = UiContext::default();
        let mut params = ParameterState::new();
        assert!(!run(&mut ui, &mut params, UiInput::default()));
        assert_eq!(params, ParameterState::new());
        assert!(!ui.draw_list().is_empty());
    }

    #[test]
    fn clicking_a_sample_count_selects_it() {
        let mut ui = UiContext::default();
        let style = Style::default();
        let mut params = ParameterState::new();

        assert!(run(&mut ui, &mut params, click(sample_item(&style, 2))));
        assert_eq!(params.sample_count(), SampleCount::X4);

        assert!(run(&mut ui, &mut params, click(sample_item(&style, 3))));
        assert_eq!(params.sample_count(), SampleCount::X8);
    }

    #[test]
    fn clicking_the_selected_entry_is_not_a_change() {
        let mut ui = UiContext::default();
        let style = Style::default();
        let mut params = ParameterState::new();
        assert!(!run(&mut ui, &mut params, click(sample_item(&style, 0))));
        assert_eq!(params.sample_count(), SampleCount::X1);
    }

    #[test]
    fn status_lines_fit_inside_the_panel() {
        let style = Style::default();
        let content_bottom = TOOLBOX_RECT.max().y - style.padding;
        let last_status = sample_item(&style, 3).y + 0.5 * style.item_height + 1.0 + style.spacing
            + 3.0 * (style.item_height + style.spacing)
            - style.spacing;
        assert!(last_status <= content_bottom, "{last_status} > {content_bottom}");
    }
}
