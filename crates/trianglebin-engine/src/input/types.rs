#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Back/forward and vendor buttons, by platform index.
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Window input the UI cares about. Positions are logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Focused(bool),
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    PointerButton { button: MouseButton, state: ButtonState },
}
