use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::snapshot::Snapshot;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SAVE_FILE_NAME: &str = "save.dat";
const HEADER_LEN: usize = 8 + 4;
const CHECKSUM_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadMagic { expected: u64, found: u64 },
    #[error("checksum verification failed")]
    ChecksumMismatch,
    #[error("save file is truncated")]
    Truncated,
    #[error("could not determine a save directory")]
    NoSaveDirectory,
}

/// Saves and loads snapshots with a checksummed file format.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses the platform data directory from the `directories` crate.
    pub fn new() -> Result<Self, PersistenceError> {
        let project_dirs =
            ProjectDirs::from("", "", "desert-quest").ok_or(PersistenceError::NoSaveDirectory)?;
        Self::with_dir(project_dirs.data_dir())
    }

    /// Store the save file under `dir`, creating it if needed.
    pub fn with_dir(dir: &Path) -> Result<Self, PersistenceError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            save_path: dir.join(SAVE_FILE_NAME),
        })
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Write a snapshot.
    ///
    /// File format:
    /// - Version magic (8 bytes, LE)
    /// - Payload length (4 bytes, LE)
    /// - JSON snapshot (variable length)
    /// - SHA256 over everything above (32 bytes)
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let bytes = encode(snapshot.to_json()?.as_bytes());
        fs::write(&self.save_path, bytes)?;
        tracing::info!(path = %self.save_path.display(), "snapshot saved");
        Ok(())
    }

    pub fn load(&self) -> Result<Snapshot, PersistenceError> {
        let bytes = fs::read(&self.save_path)?;
        let payload = decode(&bytes).map_err(|e| {
            tracing::warn!(path = %self.save_path.display(), error = %e, "save file rejected");
            e
        })?;
        let json = std::str::from_utf8(payload)
            .map_err(|e| PersistenceError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Ok(Snapshot::from_json(json)?)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn delete(&self) -> Result<(), PersistenceError> {
        if self.save_exists() {
            fs::remove_file(&self.save_path)?;
        }
        Ok(())
    }
}

fn checksum(parts: &[&[u8]]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Frame a payload with magic, length and checksum.
pub fn encode(payload: &[u8]) -> Vec<u8> {
    let magic = SAVE_VERSION_MAGIC.to_le_bytes();
    let len = (payload.len() as u32).to_le_bytes();
    let sum = checksum(&[&magic, &len, payload]);
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len() + CHECKSUM_LEN);
    out.extend_from_slice(&magic);
    out.extend_from_slice(&len);
    out.extend_from_slice(payload);
    out.extend_from_slice(&sum);
    out
}

/// Verify a framed buffer and return its payload.
pub fn decode(bytes: &[u8]) -> Result<&[u8], PersistenceError> {
    if bytes.len() < HEADER_LEN {
        return Err(PersistenceError::Truncated);
    }
    let (magic_bytes, rest) = bytes.split_at(8);
    let (len_bytes, rest) = rest.split_at(4);
    let mut magic = [0u8; 8];
    magic.copy_from_slice(magic_bytes);
    let found = u64::from_le_bytes(magic);
    if found != SAVE_VERSION_MAGIC {
        return Err(PersistenceError::BadMagic {
            expected: SAVE_VERSION_MAGIC,
            found,
        });
    }
    let mut len = [0u8; 4];
    len.copy_from_slice(len_bytes);
    let payload_len = u32::from_le_bytes(len) as usize;
    if rest.len() < payload_len + CHECKSUM_LEN {
        return Err(PersistenceError::Truncated);
    }
    let (payload, stored) = rest.split_at(payload_len);
    if stored[..CHECKSUM_LEN] != checksum(&[magic_bytes, len_bytes, payload]) {
        return Err(PersistenceError::ChecksumMismatch);
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_payload() {
        let framed = encode(b"{\"a\":1}");
        assert_eq!(framed.len(), HEADER_LEN + 7 + CHECKSUM_LEN);
        assert_eq!(decode(&framed).unwrap(), b"{\"a\":1}");
    }

    #[test]
    fn test_bad_magic() {
        let mut framed = encode(b"{}");
        framed[0] ^= 0xFF;
        assert!(matches!(decode(&framed), Err(PersistenceError::BadMagic { .. })));
    }

    #[test]
    fn test_truncated() {
        let framed = encode(b"{\"a\":1}");
        assert!(matches!(decode(&framed[..5]), Err(PersistenceError::Truncated)));
        assert!(matches!(
            decode(&framed[..framed.len() - 1]),
            Err(PersistenceError::Truncated)
        ));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut framed = encode(b"{\"a\":1}");
        framed[HEADER_LEN + 2] = b'b';
        assert!(matches!(decode(&framed), Err(PersistenceError::ChecksumMismatch)));
    }
}
