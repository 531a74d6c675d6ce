use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use nes_core::{RomHash, SharedConsole};

use crate::controller_adapter::Controllers;

/// A request from a view for the director to switch to another view. It is
/// applied right after the `update` that returned it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    ShowMenu,
    PlayGame(PathBuf),
}

/// A screen or mode of the application, such as the menu or a running game.
///
/// The director calls `enter` once when the view becomes active and `exit` once
/// when it stops being active. `update` is only called in between. A view may be
/// entered again after it exits, so both hooks must be safe to call repeatedly.
pub trait View {
    fn enter(&mut self);

    fn exit(&mut self);

    /// Advance the view by `dt` seconds. `timestamp` is the presentation clock at
    /// the start of the frame.
    fn update(&mut self, timestamp: f64, dt: f64) -> Option<Transition>;

    /// The console hosted by this view, `None` for views without emulation.
    fn console(&self) -> Option<SharedConsole>;

    /// The window title to show while this view is active.
    fn title(&self) -> Option<String> {
        None
    }
}

pub type SharedView = Rc<RefCell<dyn View>>;

/// Builds the concrete views, so the director never names them.
pub trait ViewFactory {
    fn menu_view(&mut self, paths: &[PathBuf], controllers: &Controllers) -> SharedView;

    fn game_view(
        &mut self,
        console: SharedConsole,
        path: &Path,
        hash: RomHash,
        controllers: &Controllers,
    ) -> SharedView;
}
