use trianglebin_engine::coords::Vec2;
use trianglebin_engine::input::{InputFrame, InputState, MouseButton};

/// Pointer snapshot for one UI frame, in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UiInput {
    /// `None` while the pointer is outside the window.
    pub mouse_pos: Option<Vec2>,
    /// Primary button held.
    pub mouse_down: bool,
    /// Primary button went down this frame.
    pub pressed: bool,
    /// Primary button went up this frame.
    pub released: bool,
}

impl UiInput {
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            mouse_pos: state.pointer_pos.map(Vec2::from),
            mouse_down: state.button_down(MouseButton::Left),
            pressed: frame.buttons_pressed.contains(&MouseButton::Left),
            released: frame.buttons_released.contains(&MouseButton::Left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trianglebin_engine::input::{ButtonState, InputEvent};

    #[test]
    fn snapshot_reflects_press_and_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 12.0, y: 34.0 });
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton { button: MouseButton::Left, state: ButtonState::Pressed },
        );

        let input = UiInput::from_engine(&state, &frame);
        assert_eq!(input.mouse_pos, Some(Vec2::new(12.0, 34.0)));
        assert!(input.mouse_down);
        assert!(input.pressed);
        assert!(!input.released);
    }

    #[test]
    fn right_button_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton { button: MouseButton::Right, state: ButtonState::Pressed },
        );

        let input = UiInput::from_engine(&state, &frame);
        assert!(!input.mouse_down && !input.pressed);
    }
}
