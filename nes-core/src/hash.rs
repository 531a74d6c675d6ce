use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// The identity of a ROM file, a SHA-256 digest of its contents. This is what
/// save data is keyed on, so renaming a ROM keeps its saves.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RomHash([u8; 32]);

impl RomHash {
    pub fn of_bytes(bytes: &[u8]) -> RomHash {
        RomHash::from_digest(&Sha256::digest(bytes))
    }

    fn from_digest(digest: &[u8]) -> RomHash {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(digest);
        RomHash(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for RomHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Hash a file without loading it all into memory at once.
pub fn hash_file(path: &Path) -> io::Result<RomHash> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(RomHash::from_digest(&hasher.finalize()))
}
