//! Append-only JSONL action journal with a SHA-256 hash chain, for crash recovery.
//!
//! - Line 1: header with `format_version`, `seed` and `difficulty`.
//! - Lines 2+: one accepted action per line, each chained to the previous line
//!   through `prev_sha256_hex` and `sha256_hex`.
//!
//! Each record is flushed as soon as it is written. Loading stops at the first
//! malformed, incomplete, or unchained line.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::journal::{InputJournal, InputRecord, JOURNAL_FORMAT_VERSION};
use crate::settings::Difficulty;
use crate::types::Action;

/// Previous-hash of the first record.
pub const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Header {
    format_version: u16,
    seed: u32,
    difficulty: Difficulty,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Line {
    seq: u64,
    turn: u64,
    action: Action,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Sequence number and hash the next record must chain onto.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ChainTip {
    seq: u64,
    sha256_hex: String,
}

impl ChainTip {
    fn genesis() -> Self {
        Self { seq: 0, sha256_hex: INITIAL_HASH.to_string() }
    }

    /// Hash of `(seq, turn, action)` chained onto this tip.
    fn digest(&self, turn: u64, action: Action) -> serde_json::Result<String> {
        let payload = serde_json::to_vec(&(self.seq, turn, action))?;
        let mut hasher = Sha256::new();
        hasher.update(&payload);
        hasher.update(self.sha256_hex.as_bytes());
        Ok(format!("{:064x}", hasher.finalize()))
    }

    fn link(&self, turn: u64, action: Action) -> serde_json::Result<Line> {
        Ok(Line {
            seq: self.seq,
            turn,
            action,
            prev_sha256_hex: self.sha256_hex.clone(),
            sha256_hex: self.digest(turn, action)?,
        })
    }

    fn advance(&mut self, line: &Line) {
        self.seq = line.seq + 1;
        self.sha256_hex.clone_from(&line.sha256_hex);
    }
}

fn write_json_line<T: Serialize>(out: &mut BufWriter<File>, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")?;
    out.flush()
}

pub struct JournalWriter {
    out: BufWriter<File>,
    tip: ChainTip,
}

impl JournalWriter {
    /// Creates the file (and its parent directories) and writes the header line.
    pub fn create(path: &Path, seed: u32, difficulty: &Difficulty) -> io::Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut out = BufWriter::new(File::create(path)?);
        let header =
            Header { format_version: JOURNAL_FORMAT_VERSION, seed, difficulty: difficulty.clone() };
        write_json_line(&mut out, &header)?;
        Ok(Self { out, tip: ChainTip::genesis() })
    }

    /// Continues an existing file using the chain tip reported by `load_journal_from_file`.
    pub fn resume(path: &Path, loaded: &LoadedJournal) -> io::Result<Self> {
        let out = BufWriter::new(OpenOptions::new().append(true).open(path)?);
        let tip = ChainTip { seq: loaded.next_seq, sha256_hex: loaded.last_sha256_hex.clone() };
        Ok(Self { out, tip })
    }

    /// Appends one accepted action, taken on `turn`, and flushes.
    pub fn append(&mut self, turn: u64, action: Action) -> io::Result<()> {
        let line = self.tip.link(turn, action).map_err(io::Error::other)?;
        write_json_line(&mut self.out, &line)?;
        self.tip.advance(&line);
        Ok(())
    }
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: InputJournal,
    pub last_sha256_hex: String,
    pub next_seq: u64,
}

#[derive(Debug, Error)]
pub enum JournalLoadError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal file is empty")]
    EmptyFile,
    #[error("invalid journal header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("invalid journal record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    #[error("incomplete journal line at line {line}")]
    IncompleteLine { line: usize },
    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

/// Checks one record line against the tip it must extend.
fn verify_line(text: &str, line_number: usize, tip: &ChainTip) -> Result<Line, JournalLoadError> {
    let invalid = |message: String| JournalLoadError::InvalidRecord { line: line_number, message };
    let line: Line = serde_json::from_str(text).map_err(|err| invalid(err.to_string()))?;
    if line.seq != tip.seq {
        return Err(invalid(format!("expected seq {}, found {}", tip.seq, line.seq)));
    }
    let expected = tip.digest(line.turn, line.action).map_err(|err| invalid(err.to_string()))?;
    if line.prev_sha256_hex != tip.sha256_hex || line.sha256_hex != expected {
        return Err(JournalLoadError::HashChainBroken { line: line_number });
    }
    Ok(line)
}

pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path)?;
    if content.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: content.lines().count() });
    }

    let mut lines = content.lines().zip(1..);
    let Some((first, _)) = lines.next() else {
        return Err(JournalLoadError::EmptyFile);
    };
    let header: Header = serde_json::from_str(first)
        .map_err(|err| JournalLoadError::InvalidHeader { line: 1, message: err.to_string() })?;

    let mut tip = ChainTip::genesis();
    let mut inputs = Vec::new();
    for (text, line_number) in lines {
        let line = verify_line(text, line_number, &tip)?;
        tip.advance(&line);
        inputs.push(InputRecord { seq: line.seq, action: line.action });
    }

    let journal = InputJournal {
        format_version: header.format_version,
        seed: header.seed,
        difficulty: header.difficulty,
        inputs,
    };
    Ok(LoadedJournal { journal, last_sha256_hex: tip.sha256_hex, next_seq: tip.seq })
}
