//! Tests for bump attacks, smashing, reveals, and stepping onto special tiles.

use super::support::*;

#[test]
fn bumping_an_enemy_attacks_without_moving() {
    let mut state = arena_state();
    let origin = state.player.pos;
    let id = add_enemy(&mut state, EnemyKind::Troll, origin.offset(1, 0));
    let report = state.step(Action::Move { dx: 1, dy: 0 });
    assert!(report.accepted);
    assert_eq!(state.player.pos, origin);
    assert!(state.log().iter().any(|event| matches!(
        event,
        LogEvent::PlayerHit { .. } | LogEvent::PlayerMissed { .. }
    )));
    assert!(state.floor.enemies.contains_key(id), "a troll survives one punch");
}

#[test]
fn bumping_a_crate_smashes_it_and_uses_the_turn() {
    let mut state = arena_state();
    let origin = state.player.pos;
    let prop = origin.offset(0, 1);
    state.floor.map.set_tile(prop, Tile::Barrel);

    let report = state.step(Action::Move { dx: 0, dy: 1 });

    assert!(report.accepted);
    assert_eq!(state.player.pos, origin);
    assert_eq!(state.floor.map.tile(prop), Tile::Floor);
    assert!(state.log().contains(&LogEvent::PropSmashed { tile: Tile::Barrel, pos: prop }));
}

#[test]
fn entering_a_false_wall_reveals_the_area_for_good() {
    let mut state = arena_state();
    let false_wall = add_hidden_corridor(&mut state);
    let inner = false_wall.offset(1, 0);
    assert_eq!(state.floor.apparent_tile(inner), Tile::Wall);
    state.player.pos = false_wall.offset(-1, 0);

    assert!(state.step(Action::Move { dx: 1, dy: 0 }).accepted);

    assert_eq!(state.player.pos, false_wall);
    assert!(state.log().contains(&LogEvent::HiddenAreaRevealed));
    assert!(!state.floor.hidden_area_active());
    assert!(state.floor.is_walkable(inner));
    assert_eq!(state.floor.apparent_tile(inner), Tile::Floor);

    assert!(state.step(Action::Move { dx: -1, dy: 0 }).accepted);
    assert!(state.floor.is_walkable(false_wall), "revealed stays revealed");
}

#[test]
fn concealed_interior_is_solid_from_the_outside() {
    let mut state = arena_state();
    let false_wall = add_hidden_corridor(&mut state);
    state.player.pos = false_wall.offset(0, 1);
    state.floor.map.carve(state.player.pos);
    let report = state.step(Action::Move { dx: 1, dy: -1 });
    assert!(!report.accepted);
}

#[test]
fn hidden_trap_step_consumes_the_trap() {
    let mut state = arena_state();
    let target = state.player.pos.offset(-1, 0);
    add_trap(&mut state, target, TrapKind::Poison, true);

    let report = state.step(Action::Move { dx: -1, dy: 0 });

    assert!(report.accepted);
    assert_eq!(state.floor.hidden_trap_count, 0);
    assert!(state.floor.map.trap(target).is_none());
    assert_eq!(state.floor.map.tile(target), Tile::Floor);
    assert!(state.log().contains(&LogEvent::TrapTriggered {
        kind: TrapKind::Poison,
        damage: 1,
        hidden: true
    }));
}

#[test]
fn the_way_back_up_is_sealed() {
    let mut state = arena_state();
    let exit = state.floor.exit;
    state.floor.map.set_tile(exit, Tile::Entrance);
    state.player.pos = exit.offset(1, 0);
    assert!(state.step(Action::Move { dx: -1, dy: 0 }).accepted);
    assert_eq!(state.player.pos, exit);
    assert!(state.log().contains(&LogEvent::ExitSealed));
    assert_eq!(state.floor.number, 1);
}
