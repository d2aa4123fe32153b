//! Shared fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating floor and enemy setup across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::content::EnemyKind;
use crate::entities::Enemy;
use crate::floor::{FloorState, HiddenArea, Room, RoomKind};
use crate::map::Trap;

pub(crate) const ARENA: Room = Room { x: 0, y: 0, width: 9, height: 9, kind: RoomKind::Start };

/// A single open 9x9 room with the player in its centre and nothing else on it.
pub(crate) fn arena_state() -> RunState {
    let mut floor = FloorState::new(1);
    for pos in ARENA.cells() {
        floor.map.carve(pos);
    }
    floor.rooms.push(ARENA);
    floor.exit = Pos::new(ARENA.x, ARENA.y);
    let mut player = Player::new();
    player.pos = ARENA.center();
    RunState {
        rng: DungeonRng::new(1),
        difficulty: Difficulty::normal(),
        floor,
        player,
        turn: 0,
        phase: TurnPhase::Idle,
        outcome: RunOutcome::InProgress,
        log: Vec::new(),
        auto_walk: AutoWalk::new(),
        pending_death: None,
    }
}

pub(crate) fn add_enemy(state: &mut RunState, kind: EnemyKind, pos: Pos) -> EnemyId {
    state.floor.enemies.insert(Enemy::spawn(kind, pos, 1.0, 1.0))
}

pub(crate) fn add_trap(state: &mut RunState, pos: Pos, kind: TrapKind, hidden: bool) {
    let trap = Trap::new(kind, state.floor.number, hidden);
    assert!(state.floor.map.place_trap(pos, trap), "trap fixture needs open ground");
    if hidden {
        state.floor.hidden_trap_count += 1;
    }
}

/// Adds a concealed corridor running east from the arena's right wall at row 4.
/// Returns the false wall cell.
pub(crate) fn add_hidden_corridor(state: &mut RunState) -> Pos {
    let row = ARENA.center().y;
    let tiles: Vec<Pos> = (ARENA.right() + 1..=ARENA.right() + 4).map(|x| Pos::new(x, row)).collect();
    for pos in &tiles {
        state.floor.map.carve(*pos);
    }
    let false_wall = tiles[0];
    state.floor.hidden_area = Some(HiddenArea {
        tiles: tiles.into_iter().collect(),
        false_walls: [false_wall].into_iter().collect(),
        revealed: false,
    });
    false_wall
}
