//! Trapdoor placement and the floor-wide trap scatter.

use log::debug;

use crate::floor::RoomKind;
use crate::map::Trap;
use crate::rng::DungeonRng;
use crate::types::{Pos, Tile, TrapKind};

use super::generator::GenContext;
use super::grid::{free_cells, random_free_cell};
use super::layout::farthest_room_index;
use super::progression;

const TRAP_KINDS: [TrapKind; 4] = [TrapKind::Fire, TrapKind::Poison, TrapKind::Spike, TrapKind::Shock];
const HIDDEN_TRAP_CHANCE: f64 = 0.5;

pub(super) fn random_trap(floor_number: u32, rng: &mut DungeonRng) -> Trap {
    let kind = TRAP_KINDS[rng.range_usize(0, TRAP_KINDS.len() - 1)];
    let hidden = rng.chance(HIDDEN_TRAP_CHANCE);
    Trap::new(kind, floor_number, hidden)
}

/// The way down goes in the boss room when there is one, otherwise in the room
/// farthest from the start.
pub(super) fn place_trapdoor(context: &mut GenContext<'_>) {
    let rooms = &context.floor.rooms;
    let room_index = rooms
        .iter()
        .position(|room| room.kind == RoomKind::Boss)
        .or_else(|| farthest_room_index(rooms));
    let Some(room) = room_index.map(|index| rooms[index]) else {
        debug!("floor {} has no room for a trapdoor", context.floor.number);
        return;
    };

    let interior: Vec<Pos> = free_cells(&context.floor, &room)
        .into_iter()
        .filter(|pos| room.contains_strictly(*pos))
        .collect();
    let pos = match context.rng.pick(&interior) {
        Some(pos) => *pos,
        None => random_free_cell(&context.floor, &room, context.rng).unwrap_or_else(|| room.center()),
    };
    context.floor.map.take_loot(pos);
    context.floor.map.take_trap(pos);
    context.floor.map.set_tile(pos, Tile::Trapdoor);
    context.floor.trapdoor = Some(pos);
}

pub(super) fn scatter_traps(context: &mut GenContext<'_>) {
    let count = progression::scatter_trap_count(context.floor.number, context.difficulty);
    let enemy_rooms: Vec<_> =
        context.floor.rooms.iter().copied().filter(|room| room.kind == RoomKind::Enemy).collect();
    if enemy_rooms.is_empty() {
        return;
    }
    for _ in 0..count {
        let Some(room) = context.rng.pick(&enemy_rooms).copied() else {
            break;
        };
        let Some(pos) = random_free_cell(&context.floor, &room, context.rng) else {
            continue;
        };
        let trap = random_trap(context.floor.number, context.rng);
        context.floor.map.place_trap(pos, trap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::{FloorState, Room};
    use crate::settings::Difficulty;

    #[test]
    fn trapdoor_prefers_the_boss_room_interior() {
        let difficulty = Difficulty::normal();
        let mut rng = DungeonRng::new(4);
        let mut floor = FloorState::new(5);
        let rooms = [
            Room::new(-3, -2, 7, 5, RoomKind::Start),
            Room::new(40, 0, 5, 5, RoomKind::Enemy),
            Room::new(12, 0, 5, 5, RoomKind::Boss),
        ];
        for room in &rooms {
            for pos in room.cells() {
                floor.map.carve(pos);
            }
        }
        floor.rooms = rooms.to_vec();
        let mut context = GenContext { floor, rng: &mut rng, difficulty: &difficulty };
        place_trapdoor(&mut context);
        let pos = context.floor.trapdoor.expect("trapdoor placed");
        assert!(rooms[2].contains_strictly(pos));
        assert_eq!(context.floor.map.tile(pos), Tile::Trapdoor);
    }

    #[test]
    fn trap_kinds_cover_all_four() {
        let mut rng = DungeonRng::new(10);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let trap = random_trap(1, &mut rng);
            if !seen.contains(&trap.kind) {
                seen.push(trap.kind);
            }
        }
        assert_eq!(seen.len(), TRAP_KINDS.len());
    }
}
