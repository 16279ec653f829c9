//! Binary game snapshots.
//!
//! Snapshots are stored as bincode: compact, and the same struct the game
//! produces. Files are written to a temporary path and renamed into place.

use std::fs;
use std::path::Path;

use crate::game::GameSnapshot;

use super::error::{RepositoryError, Result};

impl GameSnapshot {
    /// Encode as bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

/// Write a snapshot file.
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &GameSnapshot) -> Result<()> {
    let path = path.as_ref();
    let bytes = snapshot.to_bytes()?;

    let temp_path = path.with_extension("bin.tmp");
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)?;

    tracing::debug!(path = %path.display(), turn = snapshot.turn_number, "saved snapshot");
    Ok(())
}

/// Read a snapshot file. A missing file is `Ok(None)`.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Option<GameSnapshot>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    let snapshot = GameSnapshot::from_bytes(&bytes)?;

    tracing::debug!(path = %path.display(), turn = snapshot.turn_number, "loaded snapshot");
    Ok(Some(snapshot))
}
