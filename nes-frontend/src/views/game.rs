use std::path::{Path, PathBuf};
use std::rc::Rc;

use nes_core::controller::Button;
use nes_core::{Player, RomHash, SharedConsole};
use nes_director::{ButtonState, ControllerAdapter, Controllers, Transition, View};

use crate::audio::AudioSink;
use crate::saves::SaveStore;

/// A frame that took longer than this was a stall (a dragged window, a debugger
/// break), and is not emulated.
const MAX_FRAME_SECONDS: f64 = 1.0;

/// Runs a console, feeding it both players' buttons every frame.
pub struct GameView {
    console: SharedConsole,
    path: PathBuf,
    hash: RomHash,
    controllers: Controllers,
    audio: Rc<dyn AudioSink>,
    saves: Rc<SaveStore>,
    previous_buttons: ButtonState,
}

impl GameView {
    pub fn new(
        console: SharedConsole,
        path: &Path,
        hash: RomHash,
        controllers: Controllers,
        audio: Rc<dyn AudioSink>,
        saves: Rc<SaveStore>,
    ) -> GameView {
        GameView {
            console,
            path: path.to_path_buf(),
            hash,
            controllers,
            audio,
            saves,
            previous_buttons: ButtonState::new(),
        }
    }

    fn load_save(&self) {
        if !self.console.borrow().has_battery() {
            return;
        }
        match self.saves.load(&self.hash) {
            Ok(Some(data)) => {
                if !self.console.borrow_mut().load_sram(&data) {
                    log::warn!(
                        "Ignoring save data of the wrong size for {}",
                        self.path.display()
                    );
                }
            }
            Ok(None) => {}
            Err(error) => log::warn!("Unable to read save data: {}", error),
        }
    }

    fn write_save(&self) {
        let console = self.console.borrow();
        if let Some(sram) = console.sram() {
            if let Err(error) = self.saves.save(&self.hash, sram) {
                log::warn!("Unable to write save data: {}", error);
            }
        }
    }
}

/// Select and Start held together on player 1.
fn is_menu_chord(buttons: &ButtonState) -> bool {
    buttons[Button::Select] && buttons[Button::Start]
}

impl View for GameView {
    fn enter(&mut self) {
        self.previous_buttons = self.controllers.player_1.buttons();
        self.load_save();
        self.audio.resume();
    }

    fn exit(&mut self) {
        self.audio.pause();
        self.audio.clear();
        self.write_save();
    }

    fn update(&mut self, _timestamp: f64, dt: f64) -> Option<Transition> {
        let dt = if dt > MAX_FRAME_SECONDS { 0.0 } else { dt };
        let player_1 = self.controllers.player_1.buttons();
        let player_2 = self.controllers.player_2.buttons();

        let chord_started = is_menu_chord(&player_1) && !is_menu_chord(&self.previous_buttons);
        self.previous_buttons = player_1;
        if chord_started {
            return Some(Transition::ShowMenu);
        }

        let mut console = self.console.borrow_mut();
        console.set_buttons(Player::One, player_1.into());
        console.set_buttons(Player::Two, player_2.into());
        console.step_seconds(dt);
        None
    }

    fn console(&self) -> Option<SharedConsole> {
        Some(Rc::clone(&self.console))
    }

    fn title(&self) -> Option<String> {
        let console = self.console.borrow();
        let name = match console.title() {
            Some(title) => title.to_string(),
            None => self
                .path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.display().to_string()),
        };
        Some(format!("NES - {}", name))
    }
}
