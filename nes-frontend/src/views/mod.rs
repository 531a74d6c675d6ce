pub mod game;
pub mod menu;

#[cfg(test)]
mod test_helpers;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use nes_core::{RomHash, SharedConsole};
use nes_director::{Controllers, SharedView, ViewFactory};

use crate::audio::AudioSink;
use crate::saves::SaveStore;
use game::GameView;
use menu::MenuView;

/// Builds the menu and game views for the director.
pub struct NesViews {
    audio: Rc<dyn AudioSink>,
    saves: Rc<SaveStore>,
}

impl NesViews {
    pub fn new(audio: Rc<dyn AudioSink>, saves: SaveStore) -> NesViews {
        NesViews {
            audio,
            saves: Rc::new(saves),
        }
    }
}

impl ViewFactory for NesViews {
    fn menu_view(&mut self, paths: &[PathBuf], controllers: &Controllers) -> SharedView {
        Rc::new(RefCell::new(MenuView::new(paths, controllers.clone())))
    }

    fn game_view(
        &mut self,
        console: SharedConsole,
        path: &Path,
        hash: RomHash,
        controllers: &Controllers,
    ) -> SharedView {
        Rc::new(RefCell::new(GameView::new(
            console,
            path,
            hash,
            controllers.clone(),
            Rc::clone(&self.audio),
            Rc::clone(&self.saves),
        )))
    }
}
