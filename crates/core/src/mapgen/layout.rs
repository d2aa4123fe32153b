//! Room placement around the fixed start room.

use log::debug;

use crate::floor::{Room, RoomKind};
use crate::rng::DungeonRng;
use crate::types::manhattan;

pub const ROOM_PADDING: i32 = 2;
pub const START_ROOM: Room = Room { x: -3, y: -2, width: 7, height: 5, kind: RoomKind::Start };

const MIN_ROOM_WIDTH: i32 = 4;
const MAX_ROOM_WIDTH: i32 = 8;
const MIN_ROOM_HEIGHT: i32 = 4;
const MAX_ROOM_HEIGHT: i32 = 7;
const SPREAD_BASE: i32 = 12;
const SPREAD_PER_ROOM: i32 = 4;
const PLACEMENT_ATTEMPTS: usize = 200;
const FALLBACK_SHIFTS: usize = 40;

/// Places up to `target` rooms, the start room first. Rooms that fit nowhere are dropped.
pub(super) fn place_rooms(target: usize, rng: &mut DungeonRng) -> Vec<Room> {
    let mut rooms = vec![START_ROOM];
    let half_spread = SPREAD_BASE + SPREAD_PER_ROOM * target as i32;
    for room_index in 1..target {
        let placed =
            random_placement(&rooms, half_spread, rng).or_else(|| fallback_placement(&rooms, rng));
        match placed {
            Some(room) => rooms.push(room),
            None => debug!("room {room_index} omitted: no free space after fallback"),
        }
    }
    rooms
}

fn random_size(rng: &mut DungeonRng) -> (i32, i32) {
    let width = rng.range(MIN_ROOM_WIDTH, MAX_ROOM_WIDTH);
    let height = rng.range(MIN_ROOM_HEIGHT, MAX_ROOM_HEIGHT);
    (width, height)
}

fn random_placement(rooms: &[Room], half_spread: i32, rng: &mut DungeonRng) -> Option<Room> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let (width, height) = random_size(rng);
        let x = rng.range(-half_spread, half_spread - width);
        let y = rng.range(-half_spread, half_spread - height);
        let candidate = Room::new(x, y, width, height, RoomKind::Enemy);
        if fits(rooms, &candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Walks rightwards from the most recently placed room until a padded slot opens up.
fn fallback_placement(rooms: &[Room], rng: &mut DungeonRng) -> Option<Room> {
    let anchor = rooms.last()?;
    let (width, height) = random_size(rng);
    let mut x = anchor.right() + ROOM_PADDING + 1;
    for _ in 0..FALLBACK_SHIFTS {
        let candidate = Room::new(x, anchor.y, width, height, RoomKind::Enemy);
        if fits(rooms, &candidate) {
            debug!("room placed by fallback at ({}, {})", candidate.x, candidate.y);
            return Some(candidate);
        }
        x += ROOM_PADDING + 1;
    }
    None
}

fn fits(rooms: &[Room], candidate: &Room) -> bool {
    let padded = candidate.expanded(ROOM_PADDING);
    !rooms.iter().any(|existing| padded.intersects(existing))
}

/// Non-start room whose centre is farthest from the start room centre; first wins ties.
pub(super) fn farthest_room_index(rooms: &[Room]) -> Option<usize> {
    let origin = rooms.first()?.center();
    let mut best: Option<(u32, usize)> = None;
    for (index, room) in rooms.iter().enumerate().skip(1) {
        let distance = manhattan(origin, room.center());
        if best.is_none_or(|(best_distance, _)| distance > best_distance) {
            best = Some((distance, index));
        }
    }
    best.map(|(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placed_rooms_keep_their_padding() {
        let mut rng = DungeonRng::new(42);
        let rooms = place_rooms(12, &mut rng);
        assert_eq!(rooms[0], START_ROOM);
        assert!(rooms.len() >= 3);
        for (left_index, left) in rooms.iter().enumerate() {
            for right in &rooms[left_index + 1..] {
                assert!(
                    !left.expanded(ROOM_PADDING).intersects(right),
                    "rooms too close: {left:?} vs {right:?}"
                );
            }
        }
    }

    #[test]
    fn room_sizes_stay_in_bounds() {
        let mut rng = DungeonRng::new(9);
        let rooms = place_rooms(8, &mut rng);
        for room in &rooms[1..] {
            assert!((MIN_ROOM_WIDTH..=MAX_ROOM_WIDTH).contains(&room.width));
            assert!((MIN_ROOM_HEIGHT..=MAX_ROOM_HEIGHT).contains(&room.height));
        }
    }

    #[test]
    fn fallback_walks_right_of_the_last_room() {
        let mut rng = DungeonRng::new(1);
        let rooms = vec![START_ROOM];
        let room = fallback_placement(&rooms, &mut rng).expect("empty space to the right");
        assert!(room.x > START_ROOM.right() + ROOM_PADDING);
        assert_eq!(room.y, START_ROOM.y);
    }

    #[test]
    fn farthest_room_skips_the_start_room() {
        let rooms = vec![
            START_ROOM,
            Room::new(10, 0, 4, 4, RoomKind::Enemy),
            Room::new(-30, 0, 4, 4, RoomKind::Enemy),
        ];
        assert_eq!(farthest_room_index(&rooms), Some(2));
        assert_eq!(farthest_room_index(&rooms[..1]), None);
    }
}
