//! The boundary to the window system. The director only needs a handful of
//! operations from it, so tests can stand in a fake window without a display.

/// A physical key, independent of the windowing backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    X,
    Z,
    Space,
    Enter,
    Escape,
    RightShift,
    Up,
    Down,
    Left,
    Right,
    /// Any key the front-end has no name for.
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
    /// Key repeat, generated by the OS while a key stays down.
    Repeat,
}

pub type KeyCallback = Box<dyn FnMut(Key, KeyAction)>;

/// A source of physical key events.
pub trait KeySource {
    /// Register the callback that receives key events. Registering a new
    /// callback replaces the previous one. Events are only delivered from
    /// inside [`Presentation::poll_events`].
    fn set_key_callback(&mut self, callback: KeyCallback);
}

/// The window and presentation layer the director draws into.
pub trait Presentation {
    fn should_close(&self) -> bool;

    /// Clear the frame buffer before a view draws into it.
    fn clear(&mut self);

    fn swap_buffers(&mut self);

    /// Deliver any pending input events to the registered key callback.
    fn poll_events(&mut self);

    fn set_title(&mut self, title: &str);

    /// Seconds since an arbitrary epoch, never decreasing.
    fn time(&self) -> f64;
}
