use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use nes_core::RomHash;

/// Battery-backed save RAM on disk, one file per ROM keyed by the ROM's hash.
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: PathBuf) -> SaveStore {
        SaveStore { dir }
    }

    /// `<data dir>/nes/saves`, or `./saves` when the platform has no data dir.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("nes").join("saves"))
            .unwrap_or_else(|| PathBuf::from("saves"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, hash: &RomHash) -> PathBuf {
        self.dir.join(format!("{}.sram", hash))
    }

    /// Read the save RAM for a ROM, `None` if it was never saved.
    pub fn load(&self, hash: &RomHash) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(hash)) {
            Ok(data) => Ok(Some(data)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    pub fn save(&self, hash: &RomHash, data: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(hash), data)
    }
}
