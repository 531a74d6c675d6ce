use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use nes_core::controller::Button;
use nes_core::{hash_file, Console, RomHash, SharedConsole};
use nes_director::{
    ControllerAdapter, Controllers, DisconnectedControllerAdapter, KeyboardControllerAdapter,
};

use crate::audio::AudioSink;
use crate::saves::SaveStore;

pub fn create_controllers() -> (Controllers, Rc<KeyboardControllerAdapter>) {
    let keyboard = Rc::new(KeyboardControllerAdapter::new());
    let controllers = Controllers::new(
        keyboard.clone(),
        Rc::new(DisconnectedControllerAdapter::new()),
    );
    (controllers, keyboard)
}

pub fn press(keyboard: &KeyboardControllerAdapter, button: Button) {
    keyboard.trigger(button.index(), true);
}

pub fn release(keyboard: &KeyboardControllerAdapter, button: Button) {
    keyboard.trigger(button.index(), false);
}

/// Remembers every call made on it.
#[derive(Default)]
pub struct RecordingAudio {
    pub calls: RefCell<Vec<&'static str>>,
}

impl AudioSink for RecordingAudio {
    fn resume(&self) {
        self.calls.borrow_mut().push("resume");
    }

    fn pause(&self) {
        self.calls.borrow_mut().push("pause");
    }

    fn clear(&self) {
        self.calls.borrow_mut().push("clear");
    }
}

/// A save store in a `saves` directory under `dir`, created on first write.
pub fn create_save_store(dir: &Path) -> SaveStore {
    SaveStore::new(dir.join("saves"))
}

/// Write a one bank iNES image named `<name>.nes` into `dir` and load it.
pub fn load_console(
    dir: &Path,
    name: &str,
    flag6: u8,
    title: Option<&str>,
) -> (SharedConsole, PathBuf, RomHash) {
    let mut bytes = vec![0x4E, 0x45, 0x53, 0x1A, 1, 1, flag6, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    bytes.extend(std::iter::repeat(0xEA).take(16 * 1024));
    bytes.extend(std::iter::repeat(0x00).take(8 * 1024));
    if let Some(title) = title {
        bytes.extend(title.as_bytes());
    }
    let path = dir.join(format!("{}.nes", name));
    std::fs::write(&path, bytes).unwrap();

    let hash = hash_file(&path).unwrap();
    let console = Console::load(&path).unwrap().into_shared();
    (console, path, hash)
}
