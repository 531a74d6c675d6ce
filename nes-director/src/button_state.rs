use std::ops::Index;

pub use nes_core::controller::{Button, BUTTON_COUNT};

/// The logical state of the eight NES buttons for one input source. Every
/// button starts released.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonState([bool; BUTTON_COUNT]);

impl ButtonState {
    pub fn new() -> ButtonState {
        ButtonState([false; BUTTON_COUNT])
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.0[button.index()]
    }

    /// Record the state of a button by id. Ids outside of the button set are
    /// unmapped input and leave the state untouched.
    pub fn set(&mut self, button_id: usize, pressed: bool) {
        if let Some(held) = self.0.get_mut(button_id) {
            *held = pressed;
        }
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.0[button.index()] = pressed;
    }

    pub fn any_pressed(&self) -> bool {
        self.0.iter().any(|held| *held)
    }

    pub fn as_array(&self) -> [bool; BUTTON_COUNT] {
        self.0
    }

    /// Buttons held in `self` that were not held in `previous`.
    pub fn pressed_since(&self, previous: &ButtonState) -> ButtonState {
        let mut edges = ButtonState::new();
        for button in Button::ALL {
            edges.set_button(button, self.is_pressed(button) && !previous.is_pressed(button));
        }
        edges
    }
}

impl Index<Button> for ButtonState {
    type Output = bool;

    fn index(&self, button: Button) -> &bool {
        &self.0[button.index()]
    }
}

impl From<ButtonState> for [bool; BUTTON_COUNT] {
    fn from(state: ButtonState) -> Self {
        state.0
    }
}
