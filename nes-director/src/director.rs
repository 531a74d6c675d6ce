use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use nes_core::{hash_file, Console, RomLoadError, SharedConsole};
use thiserror::Error;

use crate::controller_adapter::Controllers;
use crate::presentation::Presentation;
use crate::view::{SharedView, Transition, ViewFactory};

#[derive(Debug, Error)]
pub enum DirectorError {
    #[error("unable to hash {path:?}: {source}")]
    Hash { path: PathBuf, source: io::Error },
    #[error("unable to load {path:?}: {source}")]
    Console { path: PathBuf, source: RomLoadError },
}

/// Owns the window, the audio handle and both controllers, and drives exactly one
/// active [`View`](crate::View) at a time.
///
/// A view switch always exits the old view before entering the new one, then
/// re-bases the frame clock so the first `dt` a view sees is measured from its own
/// activation.
pub struct Director<W: Presentation, A> {
    window: W,
    /// Kept open for as long as the director runs. Views drive their own handle.
    _audio: A,
    controllers: Controllers,
    views: Box<dyn ViewFactory>,
    view: Option<SharedView>,
    menu_view: Option<SharedView>,
    timestamp: f64,
}

impl<W: Presentation, A> Director<W, A> {
    pub fn new(
        window: W,
        audio: A,
        controllers: Controllers,
        views: Box<dyn ViewFactory>,
    ) -> Director<W, A> {
        let timestamp = window.time();
        Director {
            window,
            _audio: audio,
            controllers,
            views,
            view: None,
            menu_view: None,
            timestamp,
        }
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn controllers(&self) -> &Controllers {
        &self.controllers
    }

    pub fn current_view(&self) -> Option<&SharedView> {
        self.view.as_ref()
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Switch the active view. Passing `None` only deactivates the current one.
    pub fn set_view(&mut self, view: Option<SharedView>) {
        if let Some(previous) = self.view.take() {
            previous.borrow_mut().exit();
        }
        if let Some(next) = &view {
            next.borrow_mut().enter();
            let title = next.borrow().title();
            if let Some(title) = title {
                self.window.set_title(&title);
            }
        }
        self.view = view;
        self.timestamp = self.window.time();
    }

    /// Run a single frame of the active view.
    pub fn step(&mut self) {
        self.window.clear();
        let timestamp = self.window.time();
        let dt = (timestamp - self.timestamp).max(0.0);
        self.timestamp = timestamp;

        let transition = match &self.view {
            Some(view) => view.borrow_mut().update(timestamp, dt),
            None => None,
        };
        if let Some(transition) = transition {
            self.apply_transition(transition);
        }
    }

    /// Loop until the window wants to close, then exit the last view.
    pub fn run(&mut self) {
        while !self.window.should_close() {
            self.step();
            self.window.swap_buffers();
            self.window.poll_events();
        }
        self.set_view(None);
    }

    /// Build the menu, then either play the only ROM given or show the menu,
    /// and run until the window closes. A lone directory is listed by the menu.
    pub fn start(&mut self, paths: &[PathBuf]) -> Result<(), DirectorError> {
        self.menu_view = Some(self.views.menu_view(paths, &self.controllers));
        match paths {
            [path] if !path.is_dir() => self.play_game(path)?,
            _ => self.show_menu(),
        }
        self.run();
        Ok(())
    }

    /// Load a ROM and switch to a game view for it. On failure the current view
    /// stays active and nothing is entered or exited.
    pub fn play_game(&mut self, path: &Path) -> Result<(), DirectorError> {
        let hash = hash_file(path).map_err(|source| DirectorError::Hash {
            path: path.to_path_buf(),
            source,
        })?;
        let console = Console::load(path)
            .map_err(|source| DirectorError::Console {
                path: path.to_path_buf(),
                source,
            })?
            .into_shared();

        log::info!("Playing {:?} ({})", path, hash);
        let view = self
            .views
            .game_view(console, path, hash, &self.controllers);
        self.set_view(Some(view));
        Ok(())
    }

    /// Switch to the menu. The same menu instance is reused every time.
    pub fn show_menu(&mut self) {
        let menu = match &self.menu_view {
            Some(menu) => Rc::clone(menu),
            None => {
                let menu = self.views.menu_view(&[], &self.controllers);
                self.menu_view = Some(Rc::clone(&menu));
                menu
            }
        };
        self.set_view(Some(menu));
    }

    /// The console of the active view, if the active view hosts one.
    pub fn console(&self) -> Option<SharedConsole> {
        self.view.as_ref().and_then(|view| view.borrow().console())
    }

    fn apply_transition(&mut self, transition: Transition) {
        log::debug!("View requested {:?}", transition);
        match transition {
            Transition::ShowMenu => self.show_menu(),
            Transition::PlayGame(path) => {
                if let Err(error) = self.play_game(&path) {
                    log::error!("{}", error);
                }
            }
        }
    }
}
