mod audio;
mod error;
mod saves;
mod views;
mod window;

use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use colored::*;
use env_logger::{Builder, Env};
use nes_director::{
    ControllerAdapter, Controllers, DisconnectedControllerAdapter, Director,
    KeyboardControllerAdapter,
};

use crate::audio::{Audio, AudioSink};
use crate::error::FrontendError;
use crate::saves::SaveStore;
use crate::views::NesViews;
use crate::window::SdlWindow;

/// Play an NES ROM, or pick one from a menu.
///
/// With exactly one ROM file the game starts right away. Otherwise a menu lists
/// the ROMs given, expanding directories into the .nes files they contain. With
/// no arguments the menu lists the current directory.
#[derive(Parser, Debug)]
#[command(name = "nes", version)]
struct CliOptions {
    /// ROM files, or directories of ROM files.
    roms: Vec<PathBuf>,

    /// Scale of the window over the 256x240 picture.
    #[arg(long, default_value_t = 3)]
    scale: u32,

    /// Where battery-backed save RAM is kept.
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let options = CliOptions::parse();

    if let Err(error) = run(options) {
        eprintln!("{}", format!("Failed to run the NES: {error}").bright_red());
        std::process::exit(1);
    }
}

/// Wire the SDL window and audio, the keyboard for player 1 and an unplugged
/// player 2 into a director, then hand control to it until the window closes.
fn run(options: CliOptions) -> Result<(), FrontendError> {
    let sdl = sdl2::init()?;
    let window = SdlWindow::new(&sdl, "NES", options.scale.max(1))?;
    let audio: Rc<dyn AudioSink> = Rc::new(Audio::new(&sdl)?);

    let controllers = Controllers::new(
        Rc::new(KeyboardControllerAdapter::new()),
        Rc::new(DisconnectedControllerAdapter::new()),
    );

    let save_dir = options.save_dir.unwrap_or_else(SaveStore::default_dir);
    log::debug!("Saving to {}", save_dir.display());
    let views = NesViews::new(Rc::clone(&audio), SaveStore::new(save_dir));

    let mut director = Director::new(window, audio, controllers, Box::new(views));
    let controllers = director.controllers().clone();
    controllers.player_1.bind(director.window_mut());
    controllers.player_2.bind(director.window_mut());
    director.start(&options.roms)?;
    Ok(())
}
