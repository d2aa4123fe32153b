//! Procedural floor generation split into coherent submodules.

pub mod progression;

mod corridors;
mod generator;
mod grid;
mod hazards;
mod hidden;
mod layout;
mod pity;
mod population;
mod special_rooms;

pub use generator::DungeonGenerator;
pub use layout::{ROOM_PADDING, START_ROOM};
pub use progression::{BOSS_FLOOR_INTERVAL, STARTING_FLOOR};

use crate::entities::Player;
use crate::floor::FloorState;
use crate::rng::DungeonRng;
use crate::settings::Difficulty;

pub fn generate_floor(
    floor_number: u32,
    rng: &mut DungeonRng,
    player: &mut Player,
    difficulty: &Difficulty,
) -> FloorState {
    DungeonGenerator::new(difficulty).generate(floor_number, rng, player)
}
