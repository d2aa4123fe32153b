//! Whole-run save files with an integrity checksum.
//!
//! A save is one JSON document `{ format_version, sha256_hex, state }`, where
//! `sha256_hex` covers the canonical JSON encoding of `state`. Writes go to a
//! sibling temporary file first and are renamed into place.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::state::RunState;

pub const SAVE_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub format_version: u16,
    pub sha256_hex: String,
    pub state: RunState,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save file checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
    #[error("unsupported save format version {0}")]
    UnsupportedFormatVersion(u16),
}

fn state_sha256(state: &RunState) -> Result<String, SaveError> {
    let encoded = serde_json::to_vec(state)?;
    Ok(format!("{:064x}", Sha256::digest(&encoded)))
}

impl SaveFile {
    pub fn capture(state: &RunState) -> Result<Self, SaveError> {
        Ok(Self {
            format_version: SAVE_FORMAT_VERSION,
            sha256_hex: state_sha256(state)?,
            state: state.clone(),
        })
    }

    /// Checks the version and checksum, then hands back the run.
    pub fn into_state(self) -> Result<RunState, SaveError> {
        if self.format_version != SAVE_FORMAT_VERSION {
            return Err(SaveError::UnsupportedFormatVersion(self.format_version));
        }
        let found = state_sha256(&self.state)?;
        if found != self.sha256_hex {
            return Err(SaveError::ChecksumMismatch { expected: self.sha256_hex, found });
        }
        Ok(self.state)
    }
}

pub fn write_save(path: &Path, state: &RunState) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let save = SaveFile::capture(state)?;
    let encoded = serde_json::to_vec_pretty(&save)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, encoded)?;
    fs::rename(&tmp, path)?;
    debug!("saved run at turn {} to {}", state.turn, path.display());
    Ok(())
}

pub fn load_save(path: &Path) -> Result<RunState, SaveError> {
    let content = fs::read(path)?;
    let save: SaveFile = serde_json::from_slice(&content)?;
    save.into_state()
}
