use trianglebin_engine::paint::Color;

/// Colors and metrics shared by all widgets.
#[derive(Debug, Clone)]
pub struct Style {
    pub panel_bg: Color,
    pub title_bg: Color,
    pub text: Color,
    pub text_dim: Color,
    pub track: Color,
    pub fill: Color,
    pub thumb: Color,
    pub item_hover: Color,
    pub item_selected: Color,
    pub border: Color,

    pub font_size: f32,
    pub title_height: f32,
    pub row_height: f32,
    pub item_height: f32,
    pub padding: f32,
    pub spacing: f32,
    /// Width of the label column left of each widget.
    pub label_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            panel_bg: Color::from_straight(0.08, 0.09, 0.11, 0.92),
            title_bg: Color::from_straight(0.16, 0.29, 0.48, 1.0),
            text: Color::from_straight(0.92, 0.92, 0.92, 1.0),
            text_dim: Color::from_straight(0.62, 0.64, 0.68, 1.0),
            track: Color::from_straight(0.18, 0.2, 0.24, 1.0),
            fill: Color::from_straight(0.26, 0.59, 0.98, 1.0),
            thumb: Color::from_straight(0.85, 0.88, 0.95, 1.0),
            item_hover: Color::from_straight(0.22, 0.25, 0.3, 1.0),
            item_selected: Color::from_straight(0.26, 0.59, 0.98, 0.6),
            border: Color::from_straight(0.3, 0.32, 0.36, 1.0),

            font_size: 13.0,
            title_height: 20.0,
            row_height: 18.0,
            item_height: 15.0,
            padding: 6.0,
            spacing: 3.0,
            label_width: 190.0,
        }
    }
}
