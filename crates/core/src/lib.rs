pub mod content;
pub mod entities;
pub mod floor;
pub mod game;
pub mod items;
pub mod journal;
pub mod journal_file;
pub mod map;
pub mod mapgen;
pub mod replay;
pub mod rng;
pub mod save_file;
pub mod settings;
pub mod state;
pub mod status;
pub mod types;

pub use floor::{FloorState, HiddenArea, Room, RoomKind};
pub use game::{AttackRoll, find_path, is_combo_milestone, kill_score};
pub use journal::{InputJournal, InputRecord};
pub use mapgen::{DungeonGenerator, generate_floor};
pub use map::{Cell, SpatialIndex, Trap};
pub use replay::{ReplayError, ReplayResult, replay_state, replay_to_end};
pub use rng::{DungeonRng, RngState};
pub use save_file::{SaveError, SaveFile, load_save, write_save};
pub use settings::Difficulty;
pub use state::RunState;
pub use types::*;
