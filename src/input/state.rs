//! Input state management
//!
//! `InputState::update` takes a raw snapshot of what is held right now and
//! derives the edge-triggered "pressed this frame" / "released this frame"
//! sets by comparing against the previous snapshot. `poll` builds that
//! snapshot from macroquad.

use macroquad::math::Vec2;

/// Keys the scene cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Escape,
}

/// Number of `Key` variants.
pub const KEY_COUNT: usize = 9;

impl Key {
    pub const ALL: [Key; KEY_COUNT] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Escape,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    fn keycode(self) -> macroquad::input::KeyCode {
        use macroquad::input::KeyCode;
        match self {
            Key::Up => KeyCode::Up,
            Key::Down => KeyCode::Down,
            Key::Left => KeyCode::Left,
            Key::Right => KeyCode::Right,
            Key::W => KeyCode::W,
            Key::A => KeyCode::A,
            Key::S => KeyCode::S,
            Key::D => KeyCode::D,
            Key::Escape => KeyCode::Escape,
        }
    }
}

/// Mouse buttons, in the order left/right/middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mouse {
    Left,
    Right,
    Middle,
}

impl Mouse {
    fn slot(self) -> usize {
        self as usize
    }
}

/// What is held down right now, as read from the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawInput {
    pub keys: [bool; KEY_COUNT],
    pub mouse: [bool; 3],
    pub cursor: Vec2,
}

#[cfg(test)]
impl RawInput {
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut raw = Self::default();
        for key in keys {
            raw.keys[key.slot()] = true;
        }
        raw
    }

    pub fn with_mouse(mut self, button: Mouse, down: bool, cursor: Vec2) -> Self {
        self.mouse[button.slot()] = down;
        self.cursor = cursor;
        self
    }
}

/// Read-only view of the current frame's input.
pub trait InputSource {
    /// Movement axis, zero when idle, otherwise unit length.
    fn axis(&self) -> Vec2;

    fn is_down(&self, key: Key) -> bool;
    fn was_pressed(&self, key: Key) -> bool;
    fn was_released(&self, key: Key) -> bool;

    fn is_mouse_down(&self, button: Mouse) -> bool;
    fn was_mouse_pressed(&self, button: Mouse) -> bool;
    fn was_mouse_released(&self, button: Mouse) -> bool;

    /// Cursor position in screen pixels.
    fn cursor(&self) -> Vec2;
}

/// Per-frame input with edge detection.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: RawInput,
    previous: RawInput,
    axis: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample macroquad's keyboard and mouse. Call once per frame.
    pub fn poll(&mut self) {
        let mut raw = RawInput::default();
        for key in Key::ALL {
            raw.keys[key.slot()] = macroquad::input::is_key_down(key.keycode());
        }
        raw.mouse = [
            macroquad::input::is_mouse_button_down(macroquad::input::MouseButton::Left),
            macroquad::input::is_mouse_button_down(macroquad::input::MouseButton::Right),
            macroquad::input::is_mouse_button_down(macroquad::input::MouseButton::Middle),
        ];
        let (x, y) = macroquad::input::mouse_position();
        raw.cursor = Vec2::new(x, y);
        self.update(raw);
    }

    /// Advance one frame with a fresh snapshot.
    pub fn update(&mut self, raw: RawInput) {
        self.previous = self.current;
        self.current = raw;
        self.axis = self.compute_axis();
    }

    fn compute_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;

        // Screen space: y grows downward
        if self.is_down(Key::Up) || self.is_down(Key::W) {
            axis.y -= 1.0;
        }
        if self.is_down(Key::Down) || self.is_down(Key::S) {
            axis.y += 1.0;
        }
        if self.is_down(Key::Left) || self.is_down(Key::A) {
            axis.x -= 1.0;
        }
        if self.is_down(Key::Right) || self.is_down(Key::D) {
            axis.x += 1.0;
        }

        axis.normalize_or_zero()
    }
}

impl InputSource for InputState {
    fn axis(&self) -> Vec2 {
        self.axis
    }

    fn is_down(&self, key: Key) -> bool {
        self.current.keys[key.slot()]
    }

    fn was_pressed(&self, key: Key) -> bool {
        self.current.keys[key.slot()] && !self.previous.keys[key.slot()]
    }

    fn was_released(&self, key: Key) -> bool {
        !self.current.keys[key.slot()] && self.previous.keys[key.slot()]
    }

    fn is_mouse_down(&self, button: Mouse) -> bool {
        self.current.mouse[button.slot()]
    }

    fn was_mouse_pressed(&self, button: Mouse) -> bool {
        self.current.mouse[button.slot()] && !self.previous.mouse[button.slot()]
    }

    fn was_mouse_released(&self, button: Mouse) -> bool {
        !self.current.mouse[button.slot()] && self.previous.mouse[button.slot()]
    }

    fn cursor(&self) -> Vec2 {
        self.current.cursor
    }
}
