use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use nes_core::{RomHash, SharedConsole};

use crate::button_state::Button;
use crate::controller_adapter::{ControllerAdapter, Controllers};
use crate::presentation::{Key, KeyAction, KeyCallback, KeySource, Presentation};
use crate::view::{SharedView, Transition, View, ViewFactory};

/// How far the fake clock moves on every poll of the window.
pub const FRAME_SECONDS: f64 = 0.016;

/// A list of everything that happened to the recording views, in order.
#[derive(Clone)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn new() -> EventLog {
        EventLog(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn push(&self, line: String) {
        self.0.borrow_mut().push(line);
    }

    pub fn dump(&self) -> String {
        self.0.borrow().join("\n")
    }

    pub fn count(&self, line: &str) -> usize {
        self.0.borrow().iter().filter(|entry| *entry == line).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

#[derive(Clone)]
pub struct FakeClock(Rc<Cell<f64>>);

impl FakeClock {
    pub fn new() -> FakeClock {
        FakeClock(Rc::new(Cell::new(0.0)))
    }

    pub fn set(&self, seconds: f64) {
        self.0.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.0.set(self.0.get() + seconds);
    }

    pub fn now(&self) -> f64 {
        self.0.get()
    }
}

/// A window that stays open for a fixed number of frames. Each poll moves the
/// clock forward a frame and delivers the key events scripted for that poll.
pub struct FakeWindow {
    clock: FakeClock,
    frames_left: usize,
    polls: usize,
    scripted_keys: HashMap<usize, Vec<(Key, KeyAction)>>,
    key_callback: Option<KeyCallback>,
    pub clears: usize,
    pub swaps: usize,
    pub titles: Vec<String>,
}

impl FakeWindow {
    pub fn new(clock: &FakeClock, frames: usize) -> FakeWindow {
        FakeWindow {
            clock: clock.clone(),
            frames_left: frames,
            polls: 0,
            scripted_keys: HashMap::new(),
            key_callback: None,
            clears: 0,
            swaps: 0,
            titles: Vec::new(),
        }
    }

    pub fn script_keys(&mut self, poll: usize, keys: Vec<(Key, KeyAction)>) {
        self.scripted_keys.insert(poll, keys);
    }
}

impl Presentation for FakeWindow {
    fn should_close(&self) -> bool {
        self.frames_left == 0
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn poll_events(&mut self) {
        self.clock.advance(FRAME_SECONDS);
        self.frames_left = self.frames_left.saturating_sub(1);
        if let Some(keys) = self.scripted_keys.remove(&self.polls) {
            if let Some(callback) = self.key_callback.as_mut() {
                for (key, action) in keys {
                    callback(key, action);
                }
            }
        }
        self.polls += 1;
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn time(&self) -> f64 {
        self.clock.now()
    }
}

impl KeySource for FakeWindow {
    fn set_key_callback(&mut self, callback: KeyCallback) {
        self.key_callback = Some(callback);
    }
}

/// A key source with no window around it.
pub struct FakeKeySource {
    key_callback: Option<KeyCallback>,
}

impl FakeKeySource {
    pub fn new() -> FakeKeySource {
        FakeKeySource { key_callback: None }
    }

    pub fn has_callback(&self) -> bool {
        self.key_callback.is_some()
    }

    pub fn emit(&mut self, key: Key, action: KeyAction) {
        if let Some(callback) = self.key_callback.as_mut() {
            callback(key, action);
        }
    }
}

impl KeySource for FakeKeySource {
    fn set_key_callback(&mut self, callback: KeyCallback) {
        self.key_callback = Some(callback);
    }
}

/// A view that writes its lifecycle into an [`EventLog`] and plays back a script
/// of transitions, one per update.
pub struct RecordingView {
    name: &'static str,
    log: EventLog,
    script: VecDeque<Option<Transition>>,
    console: Option<SharedConsole>,
    controllers: Option<Controllers>,
    presses: Rc<RefCell<Vec<bool>>>,
    is_active: bool,
}

impl RecordingView {
    pub fn new(name: &'static str, log: &EventLog) -> RecordingView {
        RecordingView {
            name,
            log: log.clone(),
            script: VecDeque::new(),
            console: None,
            controllers: None,
            presses: Rc::new(RefCell::new(Vec::new())),
            is_active: false,
        }
    }

    pub fn shared(name: &'static str, log: &EventLog) -> SharedView {
        Rc::new(RefCell::new(RecordingView::new(name, log)))
    }
}

impl View for RecordingView {
    fn enter(&mut self) {
        assert!(!self.is_active, "{} was entered twice", self.name);
        self.is_active = true;
        self.log.push(format!("{} enter", self.name));
    }

    fn exit(&mut self) {
        assert!(self.is_active, "{} exited without entering", self.name);
        self.is_active = false;
        self.log.push(format!("{} exit", self.name));
    }

    fn update(&mut self, timestamp: f64, dt: f64) -> Option<Transition> {
        assert!(self.is_active, "{} updated while inactive", self.name);
        self.log.push(format!(
            "{} update t={:.3} dt={:.3}",
            self.name, timestamp, dt
        ));
        if let Some(controllers) = &self.controllers {
            let buttons = controllers.player_1.buttons();
            self.presses.borrow_mut().push(buttons[Button::A]);
        }
        self.script.pop_front().flatten()
    }

    fn console(&self) -> Option<SharedConsole> {
        self.console.clone()
    }

    fn title(&self) -> Option<String> {
        Some(self.name.to_string())
    }
}

pub struct RecordingFactory {
    log: EventLog,
    menu_script: Vec<Option<Transition>>,
    game_script: Vec<Option<Transition>>,
    games: Rc<RefCell<Vec<PathBuf>>>,
    presses: Rc<RefCell<Vec<bool>>>,
}

impl RecordingFactory {
    pub fn new(log: &EventLog) -> RecordingFactory {
        RecordingFactory {
            log: log.clone(),
            menu_script: Vec::new(),
            game_script: Vec::new(),
            games: Rc::new(RefCell::new(Vec::new())),
            presses: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_menu_script(mut self, script: Vec<Option<Transition>>) -> RecordingFactory {
        self.menu_script = script;
        self
    }

    pub fn with_game_script(mut self, script: Vec<Option<Transition>>) -> RecordingFactory {
        self.game_script = script;
        self
    }

    /// The paths of every game view built so far.
    pub fn games(&self) -> Rc<RefCell<Vec<PathBuf>>> {
        Rc::clone(&self.games)
    }

    /// Whether player 1 held A, for every update of every view built.
    pub fn presses(&self) -> Rc<RefCell<Vec<bool>>> {
        Rc::clone(&self.presses)
    }

    fn build(
        &self,
        name: &'static str,
        script: &[Option<Transition>],
        console: Option<SharedConsole>,
        controllers: &Controllers,
    ) -> SharedView {
        let mut view = RecordingView::new(name, &self.log);
        view.script = script.iter().cloned().collect();
        view.console = console;
        view.controllers = Some(controllers.clone());
        view.presses = Rc::clone(&self.presses);
        Rc::new(RefCell::new(view))
    }
}

impl ViewFactory for RecordingFactory {
    fn menu_view(&mut self, _paths: &[PathBuf], controllers: &Controllers) -> SharedView {
        self.log.push("build menu".to_string());
        self.build("menu", &self.menu_script, None, controllers)
    }

    fn game_view(
        &mut self,
        console: SharedConsole,
        path: &Path,
        _hash: RomHash,
        controllers: &Controllers,
    ) -> SharedView {
        self.games.borrow_mut().push(path.to_path_buf());
        self.build("game", &self.game_script, Some(console), controllers)
    }
}

/// Write a small iNES image into `dir` and return its path.
pub fn write_rom(dir: &Path, name: &str) -> PathBuf {
    let mut bytes: Vec<u8> = vec![0x4E, 0x45, 0x53, 0x1A, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    bytes.extend(std::iter::repeat(0xEA).take(16 * 1024));
    bytes.extend(b"Director Test\0");
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
