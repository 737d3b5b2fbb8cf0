//! The seek bar's position across runs, stored as the four-byte
//! [`SavedState`] encoding in the data directory.

use crate::config::project_dirs;
use circular_seekbar::{SavedState, SnapshotError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to determine data directory")]
    DataDirNotFound,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

pub fn get_state_path() -> Result<PathBuf, StateError> {
    let proj_dirs = project_dirs().ok_or(StateError::DataDirNotFound)?;
    Ok(proj_dirs.data_dir().join("state.bin"))
}

/// `Ok(None)` when nothing has been saved yet.
pub fn load_from(path: &Path) -> Result<Option<SavedState>, StateError> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs_err::read(path)?;
    Ok(Some(SavedState::decode(&bytes)?))
}

pub fn store_to(path: &Path, state: SavedState) -> Result<(), StateError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, state.encode())?;
    Ok(())
}

pub fn load() -> Result<Option<SavedState>, StateError> {
    load_from(&get_state_path()?)
}

pub fn store(state: SavedState) -> Result<(), StateError> {
    store_to(&get_state_path()?, state)
}
