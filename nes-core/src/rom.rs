use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

const HEADER_BYTES: usize = 16;
const TRAINER_BYTES: usize = 512;
const PRG_BANK_BYTES: usize = 16 * 1024;
const CHR_BANK_BYTES: usize = 8 * 1024;
const PLAYCHOICE_BYTES: usize = 8192 + 32;

/// "NES" followed by MS-DOS end-of-file.
const MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

#[derive(Debug, Error)]
pub enum RomLoadError {
    #[error("unable to read the ROM: {0}")]
    Io(#[from] io::Error),
    #[error("this does not appear to be an NES file")]
    InvalidHeader,
    #[error("{0}")]
    Unsupported(&'static str),
    #[error("the ROM is truncated, expected {expected} bytes but found {actual}")]
    Truncated { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub prg_rom_banks: u8,
    pub character_rom_banks: u8,
    pub mirroring: Mirroring,
    /// Cartridge contains battery-backed PRG RAM ($6000-7FFF).
    pub persistent_memory: bool,
    pub has_trainer: bool,
    pub mapper_number: u8,
    pub playchoice_10: bool,
    pub prg_ram_size: usize,
}

impl Header {
    pub fn prg_rom_bytes(&self) -> usize {
        self.prg_rom_banks as usize * PRG_BANK_BYTES
    }

    pub fn character_rom_bytes(&self) -> usize {
        self.character_rom_banks as usize * CHR_BANK_BYTES
    }

    /// https://wiki.nesdev.com/w/index.php/INES
    fn parse(bytes: &[u8]) -> Result<Header, RomLoadError> {
        if bytes.len() < HEADER_BYTES {
            return Err(RomLoadError::Truncated {
                expected: HEADER_BYTES,
                actual: bytes.len(),
            });
        }
        if bytes[0..4] != MAGIC {
            return Err(RomLoadError::InvalidHeader);
        }

        let flag6 = bytes[6];
        let flag7 = bytes[7];
        let flag8 = bytes[8];

        // 76543210
        // ||||||||
        // |||||||+- Mirroring: 0: horizontal, 1: vertical
        // ||||||+-- Battery-backed PRG RAM
        // |||||+--- 512-byte trainer at $7000-$71FF
        // ||||+---- Four-screen VRAM
        // ++++----- Lower nybble of mapper number
        let mirroring = if bit(flag6, 3) {
            Mirroring::FourScreen
        } else if bit(flag6, 0) {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        // ||||++--- If equal to 2, flags 8-15 are in NES 2.0 format
        if bit(flag7, 3) && !bit(flag7, 2) {
            return Err(RomLoadError::Unsupported(
                "NES 2.0 format is not currently supported",
            ));
        }

        Ok(Header {
            prg_rom_banks: bytes[4],
            character_rom_banks: bytes[5],
            mirroring,
            persistent_memory: bit(flag6, 1),
            has_trainer: bit(flag6, 2),
            mapper_number: (flag7 & 0b1111_0000) | (flag6 >> 4),
            playchoice_10: bit(flag7, 1),
            prg_ram_size: flag8.max(1) as usize * 8 * 1024,
        })
    }
}

/// Get the bit where 0 is the least significant bit, and 7 is the most.
fn bit(value: u8, n: u8) -> bool {
    (0b0000_0001 << n) & value != 0
}

#[derive(Debug, Clone)]
pub struct Rom {
    pub header: Header,
    pub program_rom: Vec<u8>,
    pub character_rom: Vec<u8>,
    // Trainers were used by Famicom copiers and can safely be ignored.
    // http://forums.nesdev.com/viewtopic.php?t=3657
    pub trainer: Option<Vec<u8>>,
    pub title: Option<String>,
}

impl Rom {
    pub fn load_ines_file(path: &Path) -> Result<Rom, RomLoadError> {
        let bytes = fs::read(path)?;
        Rom::from_ines_bytes(&bytes)
    }

    pub fn from_ines_bytes(bytes: &[u8]) -> Result<Rom, RomLoadError> {
        let header = Header::parse(bytes)?;
        if header.prg_rom_banks == 0 {
            return Err(RomLoadError::Unsupported("the ROM has no program banks"));
        }

        let mut reader = ByteReader {
            bytes,
            offset: HEADER_BYTES,
        };

        let trainer = if header.has_trainer {
            log::debug!("A trainer was found when loading the ROM. This will be ignored.");
            Some(reader.take(TRAINER_BYTES)?.to_vec())
        } else {
            None
        };

        let program_rom = reader.take(header.prg_rom_bytes())?.to_vec();
        let character_rom = reader.take(header.character_rom_bytes())?.to_vec();

        if header.playchoice_10 {
            log::debug!("Found PlayChoice data in the NES file, this is not supported.");
            reader.take(PLAYCHOICE_BYTES)?;
        }

        // Some ROM images additionally contain a 128-byte (or sometimes 127-byte)
        // title at the end of the file.
        let title = parse_title(reader.rest());

        Ok(Rom {
            header,
            program_rom,
            character_rom,
            trainer,
            title,
        })
    }
}

fn parse_title(bytes: &[u8]) -> Option<String> {
    let title: String = bytes
        .iter()
        .take_while(|ch| **ch != 0)
        .map(|ch| *ch as char)
        .collect();
    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(String::from(title))
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn take(&mut self, size: usize) -> Result<&'a [u8], RomLoadError> {
        let end = self.offset + size;
        if end > self.bytes.len() {
            return Err(RomLoadError::Truncated {
                expected: end,
                actual: self.bytes.len(),
            });
        }
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }
}
