//! The whole run as one serialisable value.
//! This module exists so saves, replays, and snapshot hashes all see the same data.
//! It does not own turn rules; those live in `game`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::entities::Player;
use crate::floor::FloorState;
use crate::rng::DungeonRng;
use crate::settings::Difficulty;
use crate::types::{DeathCause, Direction, LogEvent, RunOutcome, TurnPhase};

/// Pending auto-walk steps, drained one per host update.
pub type AutoWalk = VecDeque<Direction>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub rng: DungeonRng,
    pub difficulty: Difficulty,
    pub floor: FloorState,
    pub player: Player,
    pub turn: u64,
    pub phase: TurnPhase,
    pub outcome: RunOutcome,
    pub log: Vec<LogEvent>,
    pub auto_walk: AutoWalk,
    /// First lethal cause seen during the turn in progress; empty between turns.
    #[serde(skip)]
    pub(crate) pending_death: Option<DeathCause>,
}

impl RunState {
    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn is_over(&self) -> bool {
        !matches!(self.outcome, RunOutcome::InProgress)
    }

    pub fn is_auto_walking(&self) -> bool {
        !self.auto_walk.is_empty()
    }
}
