use std::collections::HashSet;

use super::types::MouseButton;

/// Per-frame input transitions.
///
/// `InputState` holds what is currently down; `InputFrame` holds what
/// changed since the last frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
    /// Number of events applied this frame.
    pub event_count: usize,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.event_count = 0;
    }
}
