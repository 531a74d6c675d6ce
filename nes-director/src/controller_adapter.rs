use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::button_state::{Button, ButtonState};
use crate::presentation::{Key, KeyAction, KeySource};

/// Translates events from a physical input source into the button state of one
/// player. The whole loop runs on a single thread, so adapters use interior
/// mutability rather than locks.
pub trait ControllerAdapter {
    /// The current snapshot of the buttons.
    fn buttons(&self) -> ButtonState;

    /// Record a press or release edge. Unknown button ids are ignored.
    fn trigger(&self, button_id: usize, pressed: bool);

    /// Start listening to a physical input source.
    fn bind(&self, source: &mut dyn KeySource);
}

/// The shared button storage the other adapters compose.
#[derive(Debug, Default)]
pub struct BasicControllerAdapter {
    state: Cell<ButtonState>,
}

impl BasicControllerAdapter {
    pub fn new() -> BasicControllerAdapter {
        BasicControllerAdapter {
            state: Cell::new(ButtonState::new()),
        }
    }
}

impl ControllerAdapter for BasicControllerAdapter {
    fn buttons(&self) -> ButtonState {
        self.state.get()
    }

    fn trigger(&self, button_id: usize, pressed: bool) {
        let mut state = self.state.get();
        state.set(button_id, pressed);
        self.state.set(state);
    }

    fn bind(&self, _source: &mut dyn KeySource) {}
}

/// The default keyboard layout for player 1.
pub fn default_key_bindings() -> HashMap<Key, Button> {
    HashMap::from([
        (Key::Z, Button::A),
        (Key::X, Button::B),
        (Key::RightShift, Button::Select),
        (Key::Enter, Button::Start),
        (Key::Up, Button::Up),
        (Key::Down, Button::Down),
        (Key::Left, Button::Left),
        (Key::Right, Button::Right),
    ])
}

/// Drives a player from the keyboard. The key table is fixed when the adapter is
/// created; binding to a key source happens once, later binds are ignored.
pub struct KeyboardControllerAdapter {
    basic: Rc<BasicControllerAdapter>,
    bindings: Rc<HashMap<Key, Button>>,
    is_bound: Cell<bool>,
}

impl KeyboardControllerAdapter {
    pub fn new() -> KeyboardControllerAdapter {
        KeyboardControllerAdapter::with_bindings(default_key_bindings())
    }

    pub fn with_bindings(bindings: HashMap<Key, Button>) -> KeyboardControllerAdapter {
        KeyboardControllerAdapter {
            basic: Rc::new(BasicControllerAdapter::new()),
            bindings: Rc::new(bindings),
            is_bound: Cell::new(false),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.is_bound.get()
    }
}

impl ControllerAdapter for KeyboardControllerAdapter {
    fn buttons(&self) -> ButtonState {
        self.basic.buttons()
    }

    fn trigger(&self, button_id: usize, pressed: bool) {
        self.basic.trigger(button_id, pressed);
    }

    fn bind(&self, source: &mut dyn KeySource) {
        if self.is_bound.replace(true) {
            log::debug!("The keyboard controller is already bound, ignoring the new source.");
            return;
        }

        let basic = Rc::clone(&self.basic);
        let bindings = Rc::clone(&self.bindings);
        source.set_key_callback(Box::new(move |key: Key, action: KeyAction| {
            let pressed = match action {
                KeyAction::Press => true,
                KeyAction::Release => false,
                KeyAction::Repeat => return,
            };
            if let Some(button) = bindings.get(&key) {
                basic.trigger(button.index(), pressed);
            }
        }));
    }
}

/// A placeholder for an unplugged controller. Nothing is ever pressed.
#[derive(Debug, Default)]
pub struct DisconnectedControllerAdapter;

impl DisconnectedControllerAdapter {
    pub fn new() -> DisconnectedControllerAdapter {
        DisconnectedControllerAdapter
    }
}

impl ControllerAdapter for DisconnectedControllerAdapter {
    fn buttons(&self) -> ButtonState {
        ButtonState::new()
    }

    fn trigger(&self, _button_id: usize, _pressed: bool) {}

    fn bind(&self, _source: &mut dyn KeySource) {}
}

/// The adapters for both player slots.
#[derive(Clone)]
pub struct Controllers {
    pub player_1: Rc<dyn ControllerAdapter>,
    pub player_2: Rc<dyn ControllerAdapter>,
}

impl Controllers {
    pub fn new(
        player_1: Rc<dyn ControllerAdapter>,
        player_2: Rc<dyn ControllerAdapter>,
    ) -> Controllers {
        Controllers { player_1, player_2 }
    }
}
