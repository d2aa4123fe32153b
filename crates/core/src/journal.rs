//! In-memory record of every accepted action in a run.
//! A journal plus the seed and difficulty it names is enough to rebuild the run exactly.

use serde::{Deserialize, Serialize};

use crate::settings::Difficulty;
use crate::types::Action;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u32,
    pub difficulty: Difficulty,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub action: Action,
}

impl InputJournal {
    pub fn new(seed: u32, difficulty: Difficulty) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, difficulty, inputs: Vec::new() }
    }

    /// Sequence number the next appended action will carry.
    pub fn next_seq(&self) -> u64 {
        self.inputs.len() as u64
    }

    pub fn append(&mut self, action: Action) {
        let seq = self.next_seq();
        self.inputs.push(InputRecord { seq, action });
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_actions_are_numbered_in_order() {
        let mut journal = InputJournal::new(42, Difficulty::hard());
        journal.append(Action::Wait);
        journal.append(Action::Move { dx: 1, dy: -1 });
        assert_eq!(journal.inputs[0].seq, 0);
        assert_eq!(journal.inputs[1], InputRecord { seq: 1, action: Action::Move { dx: 1, dy: -1 } });
        assert_eq!(journal.next_seq(), 2);
    }

    #[test]
    fn json_keeps_seed_difficulty_and_actions() {
        let mut journal = InputJournal::new(7, Difficulty::easy());
        journal.append(Action::UseItem { slot: 3 });
        let decoded = InputJournal::from_json(&journal.to_json().expect("serializes"))
            .expect("deserializes");
        assert_eq!(decoded, journal);
    }
}
