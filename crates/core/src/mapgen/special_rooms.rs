//! Promotes ordinary enemy rooms to special room kinds.

use crate::floor::{Room, RoomKind};
use crate::rng::DungeonRng;

use super::layout::farthest_room_index;

/// Each kind gets its own pass over the rooms still typed as enemy rooms, in this order.
const SPECIAL_ROOM_CHANCES: [(RoomKind, f64); 4] = [
    (RoomKind::Treasure, 0.12),
    (RoomKind::Trap, 0.10),
    (RoomKind::Shop, 0.08),
    (RoomKind::Shrine, 0.06),
];

pub(super) fn assign_special_rooms(rooms: &mut [Room], rng: &mut DungeonRng) {
    for (kind, chance) in SPECIAL_ROOM_CHANCES {
        for room in rooms.iter_mut() {
            if room.kind == RoomKind::Enemy && rng.chance(chance) {
                room.kind = kind;
            }
        }
    }
}

/// Boss floors turn the room farthest from the start into the boss lair.
pub(super) fn assign_boss_room(rooms: &mut [Room]) -> Option<usize> {
    let index = farthest_room_index(rooms)?;
    rooms[index].kind = RoomKind::Boss;
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_boss_rooms_keep_their_kind() {
        let mut rooms = vec![
            Room::new(-3, -2, 7, 5, RoomKind::Start),
            Room::new(20, 0, 5, 5, RoomKind::Enemy),
            Room::new(8, 0, 5, 5, RoomKind::Enemy),
        ];
        assert_eq!(assign_boss_room(&mut rooms), Some(1));
        let mut rng = DungeonRng::new(77);
        for _ in 0..50 {
            assign_special_rooms(&mut rooms, &mut rng);
        }
        assert_eq!(rooms[0].kind, RoomKind::Start);
        assert_eq!(rooms[1].kind, RoomKind::Boss);
    }

    #[test]
    fn promotions_eventually_happen() {
        let mut rooms: Vec<Room> =
            (0..40).map(|index| Room::new(index * 10, 0, 4, 4, RoomKind::Enemy)).collect();
        let mut rng = DungeonRng::new(2024);
        assign_special_rooms(&mut rooms, &mut rng);
        assert!(rooms.iter().any(|room| room.kind != RoomKind::Enemy));
    }
}
