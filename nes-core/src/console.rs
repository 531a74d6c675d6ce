use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::controller::{Controller, BUTTON_COUNT};
use crate::rom::{Rom, RomLoadError};

/// NTSC CPU clock divided by 60Hz frame rate gives ~29,829 CPU ticks per frame.
/// https://www.nesdev.org/wiki/Clock_rate
pub const NTSC_CPU_HZ: f64 = 1_789_773.0;
pub const NTSC_FRAME_RATE: f64 = 60.0;
pub const CPU_TICKS_PER_FRAME: u64 = (NTSC_CPU_HZ / NTSC_FRAME_RATE) as u64;

pub type SharedConsole = Rc<RefCell<Console>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

/// The handle to a loaded cartridge. It requires a front-end to actually produce
/// video, sound, and take gamepad input.
pub struct Console {
    rom: Rom,
    controller_1: Controller,
    controller_2: Controller,
    /// Battery-backed PRG RAM, only present when the cartridge declares a battery.
    sram: Option<Vec<u8>>,
    tick_count: u64,
    /// Fractional CPU ticks carried between steps so no time is lost to rounding.
    tick_remainder: f64,
}

impl Console {
    pub fn load(path: &Path) -> Result<Console, RomLoadError> {
        let rom = Rom::load_ines_file(path)?;
        log::debug!(
            "Loaded {:?}: mapper {}, {} PRG banks, {} CHR banks",
            path,
            rom.header.mapper_number,
            rom.header.prg_rom_banks,
            rom.header.character_rom_banks
        );
        Ok(Console::new(rom))
    }

    pub fn new(rom: Rom) -> Console {
        let sram = if rom.header.persistent_memory {
            Some(vec![0; rom.header.prg_ram_size])
        } else {
            None
        };
        Console {
            rom,
            controller_1: Controller::new(),
            controller_2: Controller::new(),
            sram,
            tick_count: 0,
            tick_remainder: 0.0,
        }
    }

    pub fn into_shared(self) -> SharedConsole {
        Rc::new(RefCell::new(self))
    }

    pub fn title(&self) -> Option<&str> {
        self.rom.title.as_deref()
    }

    pub fn controller(&mut self, player: Player) -> &mut Controller {
        match player {
            Player::One => &mut self.controller_1,
            Player::Two => &mut self.controller_2,
        }
    }

    pub fn set_buttons(&mut self, player: Player, buttons: [bool; BUTTON_COUNT]) {
        self.controller(player).set_buttons(buttons);
    }

    /// Advance the console clock by `seconds` of wall time, returning the number
    /// of whole CPU ticks that elapsed.
    pub fn step_seconds(&mut self, seconds: f64) -> u64 {
        if seconds <= 0.0 {
            return 0;
        }
        let ticks = seconds * NTSC_CPU_HZ + self.tick_remainder;
        let whole = ticks.floor();
        self.tick_remainder = ticks - whole;
        self.tick_count += whole as u64;
        whole as u64
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn frame_count(&self) -> u64 {
        self.tick_count / CPU_TICKS_PER_FRAME
    }

    pub fn has_battery(&self) -> bool {
        self.sram.is_some()
    }

    pub fn sram(&self) -> Option<&[u8]> {
        self.sram.as_deref()
    }

    /// Restore battery-backed RAM. Data of the wrong size is ignored, returning false.
    pub fn load_sram(&mut self, data: &[u8]) -> bool {
        match self.sram.as_mut() {
            Some(sram) if sram.len() == data.len() => {
                sram.copy_from_slice(data);
                true
            }
            _ => false,
        }
    }
}
