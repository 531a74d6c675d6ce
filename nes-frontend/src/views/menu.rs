use std::fs;
use std::path::{Path, PathBuf};

use nes_core::controller::Button;
use nes_core::SharedConsole;
use nes_director::{ButtonState, ControllerAdapter, Controllers, Transition, View};

/// Lists the ROMs that can be played. Player 1 moves the selection with up and
/// down, and starts the selected game with Start or A.
pub struct MenuView {
    roms: Vec<PathBuf>,
    selected: usize,
    controllers: Controllers,
    previous_buttons: ButtonState,
}

impl MenuView {
    pub fn new(paths: &[PathBuf], controllers: Controllers) -> MenuView {
        let roms = if paths.is_empty() {
            discover_roms(&[PathBuf::from(".")])
        } else {
            discover_roms(paths)
        };
        MenuView {
            roms,
            selected: 0,
            controllers,
            previous_buttons: ButtonState::new(),
        }
    }

    pub fn roms(&self) -> &[PathBuf] {
        &self.roms
    }

    pub fn selected(&self) -> Option<&Path> {
        self.roms.get(self.selected).map(PathBuf::as_path)
    }

    fn move_selection(&mut self, forward: bool) {
        let count = self.roms.len();
        self.selected = if forward {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
        if let Some(path) = self.selected() {
            log::info!("Selected {}", path.display());
        }
    }
}

impl View for MenuView {
    fn enter(&mut self) {
        // Anything held while the previous view was active is not a new press.
        self.previous_buttons = self.controllers.player_1.buttons();
        match self.selected() {
            Some(path) => log::info!(
                "{} games found, {} is selected",
                self.roms.len(),
                path.display()
            ),
            None => log::warn!("No .nes files were found to list in the menu"),
        }
    }

    fn exit(&mut self) {}

    fn update(&mut self, _timestamp: f64, _dt: f64) -> Option<Transition> {
        let buttons = self.controllers.player_1.buttons();
        let pressed = buttons.pressed_since(&self.previous_buttons);
        self.previous_buttons = buttons;

        if self.roms.is_empty() {
            return None;
        }
        if pressed[Button::Up] {
            self.move_selection(false);
        }
        if pressed[Button::Down] {
            self.move_selection(true);
        }
        if pressed[Button::Start] || pressed[Button::A] {
            return self
                .selected()
                .map(|path| Transition::PlayGame(path.to_path_buf()));
        }
        None
    }

    fn console(&self) -> Option<SharedConsole> {
        None
    }

    fn title(&self) -> Option<String> {
        Some(String::from("NES - Select a game"))
    }
}

/// Expand directories into the `.nes` files they contain, keeping plain file
/// paths as they are.
pub fn discover_roms(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut roms = Vec::new();
    for path in paths {
        if !path.is_dir() {
            roms.push(path.clone());
            continue;
        }
        match fs::read_dir(path) {
            Ok(entries) => {
                let mut found: Vec<PathBuf> = entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.path())
                    .filter(|path| path.is_file() && is_nes_file(path))
                    .collect();
                found.sort();
                roms.extend(found);
            }
            Err(error) => log::warn!("Unable to list {}: {}", path.display(), error),
        }
    }
    roms
}

fn is_nes_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("nes"))
}
