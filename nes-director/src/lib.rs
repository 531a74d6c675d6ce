//! Drives a single active [`View`] with a fixed render/poll loop, and folds
//! physical key events into per-player [`ButtonState`] that any view can poll.

// Clippy rules to disable.
#![allow(clippy::new_without_default)]

pub mod button_state;
pub mod controller_adapter;
pub mod director;
pub mod presentation;
pub mod view;

#[cfg(test)]
mod test_helpers;

pub use button_state::ButtonState;
pub use controller_adapter::{
    BasicControllerAdapter, ControllerAdapter, Controllers, DisconnectedControllerAdapter,
    KeyboardControllerAdapter,
};
pub use director::{Director, DirectorError};
pub use presentation::{Key, KeyAction, KeyCallback, KeySource, Presentation};
pub use view::{SharedView, Transition, View, ViewFactory};
