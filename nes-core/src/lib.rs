// Clippy rules to disable.
#![allow(clippy::new_without_default)]

pub mod console;
pub mod controller;
pub mod hash;
pub mod rom;

pub use console::{Console, Player, SharedConsole};
pub use hash::{hash_file, RomHash};
pub use rom::{Rom, RomLoadError};
