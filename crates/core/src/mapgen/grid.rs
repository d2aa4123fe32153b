//! Cell queries shared by population, hazard, and hidden-area placement.

use crate::floor::{FloorState, Room};
use crate::rng::DungeonRng;
use crate::types::{Direction, Pos};

/// Open ground with nothing standing or lying on it.
pub(super) fn is_free(floor: &FloorState, pos: Pos) -> bool {
    floor.map.get(pos).is_some_and(|cell| {
        cell.tile.is_open_ground() && cell.loot.is_none() && cell.trap.is_none()
    }) && floor.enemy_at(pos).is_none()
        && floor.mouse.is_none_or(|mouse| mouse.pos != pos)
}

pub(super) fn free_cells(floor: &FloorState, room: &Room) -> Vec<Pos> {
    room.cells().filter(|pos| is_free(floor, *pos)).collect()
}

pub(super) fn random_free_cell(floor: &FloorState, room: &Room, rng: &mut DungeonRng) -> Option<Pos> {
    let cells = free_cells(floor, room);
    rng.pick(&cells).copied()
}

/// A blocking prop may only go where all eight neighbours are open ground, so the
/// ring around it keeps every route through the room intact.
pub(super) fn is_prop_safe(floor: &FloorState, pos: Pos) -> bool {
    is_free(floor, pos)
        && Direction::ALL.into_iter().all(|direction| floor.map.tile(pos.step(direction)).is_open_ground())
}

pub(super) fn prop_cell(
    floor: &FloorState,
    room: &Room,
    preferred: Option<Pos>,
    rng: &mut DungeonRng,
) -> Option<Pos> {
    if let Some(pos) = preferred
        && is_prop_safe(floor, pos)
    {
        return Some(pos);
    }
    let cells: Vec<Pos> = room.cells().filter(|pos| is_prop_safe(floor, *pos)).collect();
    rng.pick(&cells).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::RoomKind;
    use crate::types::Tile;

    fn open_floor(room: &Room) -> FloorState {
        let mut floor = FloorState::new(1);
        for pos in room.cells() {
            floor.map.carve(pos);
        }
        floor
    }

    #[test]
    fn room_edges_are_never_prop_safe() {
        let room = Room::new(0, 0, 5, 5, RoomKind::Enemy);
        let floor = open_floor(&room);
        let safe: Vec<Pos> = room.cells().filter(|pos| is_prop_safe(&floor, *pos)).collect();
        assert_eq!(safe.len(), 9);
        assert!(safe.iter().all(|pos| room.contains_strictly(*pos)));
    }

    #[test]
    fn props_never_touch_each_other() {
        let room = Room::new(0, 0, 5, 5, RoomKind::Enemy);
        let mut floor = open_floor(&room);
        floor.map.set_tile(Pos::new(2, 2), Tile::Crate);
        let safe: Vec<Pos> = room.cells().filter(|pos| is_prop_safe(&floor, *pos)).collect();
        assert!(safe.is_empty(), "every interior cell now borders the crate: {safe:?}");
    }

    #[test]
    fn preferred_cell_wins_when_safe() {
        let room = Room::new(0, 0, 5, 5, RoomKind::Shrine);
        let floor = open_floor(&room);
        let mut rng = DungeonRng::new(3);
        assert_eq!(prop_cell(&floor, &room, Some(room.center()), &mut rng), Some(room.center()));
        let fallback = prop_cell(&floor, &room, Some(Pos::new(0, 0)), &mut rng);
        assert!(fallback.is_some_and(|pos| room.contains_strictly(pos)));
    }
}
