//! Deterministic replay of an input journal from a fresh run.

use crate::journal::{InputJournal, JOURNAL_FORMAT_VERSION};
use crate::state::RunState;
use crate::types::RunOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    UnsupportedFormatVersion(u16),
    /// Records must be numbered 0, 1, 2, ... with no holes.
    SequenceGap { expected: u64, found: u64 },
    /// A journaled action was rejected, so the journal does not match this build's rules.
    RejectedInput { seq: u64 },
    InputAfterGameOver { seq: u64 },
    /// The final state could not be encoded for hashing.
    Snapshot(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_turn: u64,
    pub final_snapshot_hash: u64,
    pub outcome: RunOutcome,
}

pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    let state = replay_state(journal)?;
    let final_snapshot_hash =
        state.snapshot_hash().map_err(|err| ReplayError::Snapshot(err.to_string()))?;
    Ok(ReplayResult {
        final_turn: state.turn,
        final_snapshot_hash,
        outcome: state.outcome.clone(),
    })
}

/// Rebuilds the full run state a journal describes.
pub fn replay_state(journal: &InputJournal) -> Result<RunState, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormatVersion(journal.format_version));
    }
    let mut state = RunState::new(journal.seed, journal.difficulty.clone());
    for (expected, record) in (0u64..).zip(&journal.inputs) {
        if record.seq != expected {
            return Err(ReplayError::SequenceGap { expected, found: record.seq });
        }
        if state.is_over() {
            return Err(ReplayError::InputAfterGameOver { seq: record.seq });
        }
        if !state.step(record.action).accepted {
            return Err(ReplayError::RejectedInput { seq: record.seq });
        }
    }
    Ok(state)
}
