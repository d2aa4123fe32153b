//! High-level floor generation orchestration.

use log::debug;

use crate::entities::Player;
use crate::floor::FloorState;
use crate::rng::DungeonRng;
use crate::settings::Difficulty;
use crate::types::{Pos, Tile};

use super::corridors::connect_rooms;
use super::hazards::{place_trapdoor, scatter_traps};
use super::hidden::try_place_hidden_area;
use super::layout::{START_ROOM, place_rooms};
use super::pity::{ensure_food, ensure_full_heal};
use super::population::populate_rooms;
use super::progression::{self, STARTING_FLOOR};
use super::special_rooms::{assign_boss_room, assign_special_rooms};

/// Everything a generation stage may touch. The floor is owned until the pipeline hands it back.
pub(super) struct GenContext<'a> {
    pub(super) floor: FloorState,
    pub(super) rng: &'a mut DungeonRng,
    pub(super) difficulty: &'a Difficulty,
}

impl GenContext<'_> {
    pub(super) fn floor_number(&self) -> u32 {
        self.floor.number
    }
}

pub struct DungeonGenerator<'a> {
    difficulty: &'a Difficulty,
}

impl<'a> DungeonGenerator<'a> {
    pub fn new(difficulty: &'a Difficulty) -> Self {
        Self { difficulty }
    }

    /// Builds floor `floor_number` from the shared run stream and moves the player onto it.
    /// Only the player's position changes.
    pub fn generate(&self, floor_number: u32, rng: &mut DungeonRng, player: &mut Player) -> FloorState {
        let target_rooms = progression::target_room_count(floor_number);
        let mut rooms = place_rooms(target_rooms, rng);
        if progression::is_boss_floor(floor_number) {
            assign_boss_room(&mut rooms);
        }

        let mut floor = FloorState::new(floor_number);
        for room in &rooms {
            for pos in room.cells() {
                floor.map.carve(pos);
            }
        }
        connect_rooms(&mut floor.map, &rooms, rng);
        assign_special_rooms(&mut rooms, rng);
        floor.rooms = rooms;

        floor.exit = Pos::new(START_ROOM.center().x, START_ROOM.y);
        let exit_tile = if floor_number == STARTING_FLOOR { Tile::Entrance } else { Tile::Upstairs };
        floor.map.set_tile(floor.exit, exit_tile);

        let mut context = GenContext { floor, rng, difficulty: self.difficulty };
        populate_rooms(&mut context);
        place_trapdoor(&mut context);
        scatter_traps(&mut context);
        try_place_hidden_area(&mut context);
        ensure_food(&mut context);
        ensure_full_heal(&mut context);

        let mut floor = context.floor;
        floor.hidden_trap_count = floor
            .map
            .iter()
            .filter(|(_, cell)| cell.trap.is_some_and(|trap| trap.hidden))
            .count() as u32;
        player.pos = spawn_point(&floor);
        debug!(
            "floor {floor_number}: {} rooms, {} enemies, hidden area {}",
            floor.rooms.len(),
            floor.enemies.len(),
            floor.hidden_area.is_some()
        );
        floor
    }
}

/// Two rows below the exit, inside the start room.
fn spawn_point(floor: &FloorState) -> Pos {
    let spawn = floor.exit.offset(0, 2);
    if floor.is_walkable(spawn) { spawn } else { START_ROOM.center() }
}
