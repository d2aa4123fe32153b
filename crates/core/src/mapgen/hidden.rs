//! Optional hidden area: a two-wide corridor behind false walls ending in a small room,
//! plus the mouse that hints at it.

use std::collections::BTreeSet;

use log::debug;

use crate::content::random_potion;
use crate::entities::Mouse;
use crate::floor::{HiddenArea, Room, RoomKind};
use crate::map::Trap;
use crate::rng::DungeonRng;
use crate::types::{Direction, Pos};

use super::generator::GenContext;
use super::grid::random_free_cell;
use super::hazards::random_trap;

const HIDDEN_AREA_CHANCE: f64 = 0.12;
const PLACEMENT_ATTEMPTS: usize = 20;
const MIN_CORRIDOR_LENGTH: i32 = 3;
const MAX_CORRIDOR_LENGTH: i32 = 6;
const MIN_END_ROOM_SIZE: i32 = 3;
const MAX_END_ROOM_SIZE: i32 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
struct HiddenPlan {
    tiles: BTreeSet<Pos>,
    false_walls: BTreeSet<Pos>,
    end_room: Vec<Pos>,
}

pub(super) fn try_place_hidden_area(context: &mut GenContext<'_>) -> bool {
    if !context.rng.chance(HIDDEN_AREA_CHANCE) {
        return false;
    }
    let mut anchors: Vec<Room> =
        context.floor.rooms.iter().copied().filter(|room| room.kind != RoomKind::Start).collect();
    if anchors.is_empty() {
        anchors = context.floor.rooms.clone();
    }

    for _ in 0..PLACEMENT_ATTEMPTS {
        let Some(anchor) = context.rng.pick(&anchors).copied() else {
            return false;
        };
        let Some(side) = context.rng.pick(&Direction::ORTHOGONAL).copied() else {
            return false;
        };
        let plan = plan_hidden_area(&anchor, side, context.rng);
        if fits(context, &plan) {
            apply_plan(context, &anchor, plan);
            return true;
        }
    }
    debug!("floor {}: no room for a hidden area", context.floor.number);
    false
}

/// Lays the area out along `side`: `outward` points away from the anchor room and
/// `lateral` spans the corridor's two columns.
fn plan_hidden_area(anchor: &Room, side: Direction, rng: &mut DungeonRng) -> HiddenPlan {
    let (outward_x, outward_y) = side.delta();
    let (lateral_x, lateral_y) = (outward_y.abs(), outward_x.abs());
    let base = match side {
        Direction::North => Pos::new(rng.range(anchor.x, anchor.right() - 1), anchor.y - 1),
        Direction::South => Pos::new(rng.range(anchor.x, anchor.right() - 1), anchor.bottom() + 1),
        Direction::West => Pos::new(anchor.x - 1, rng.range(anchor.y, anchor.bottom() - 1)),
        _ => Pos::new(anchor.right() + 1, rng.range(anchor.y, anchor.bottom() - 1)),
    };
    let at = |along: i32, across: i32| {
        base.offset(outward_x * along + lateral_x * across, outward_y * along + lateral_y * across)
    };

    let length = rng.range(MIN_CORRIDOR_LENGTH, MAX_CORRIDOR_LENGTH);
    let depth = rng.range(MIN_END_ROOM_SIZE, MAX_END_ROOM_SIZE);
    let breadth = rng.range(MIN_END_ROOM_SIZE, MAX_END_ROOM_SIZE);
    let shift = rng.range(0, breadth - 2);

    let mut tiles = BTreeSet::new();
    for along in 0..length {
        for across in 0..2 {
            tiles.insert(at(along, across));
        }
    }
    let false_walls: BTreeSet<Pos> = (0..2).map(|across| at(0, across)).collect();
    let mut end_room = Vec::new();
    for along in length..length + depth {
        for across in -shift..breadth - shift {
            let pos = at(along, across);
            tiles.insert(pos);
            end_room.push(pos);
        }
    }
    HiddenPlan { tiles, false_walls, end_room }
}

/// Every planned cell must be solid rock, and apart from the false walls no planned
/// cell may touch anything already carved.
fn fits(context: &GenContext<'_>, plan: &HiddenPlan) -> bool {
    let map = &context.floor.map;
    plan.tiles.iter().all(|pos| !map.contains(*pos))
        && plan.tiles.iter().filter(|pos| !plan.false_walls.contains(pos)).all(|pos| {
            Direction::ALL.into_iter().all(|direction| {
                let neighbour = pos.step(direction);
                plan.tiles.contains(&neighbour) || !map.contains(neighbour)
            })
        })
}

fn apply_plan(context: &mut GenContext<'_>, anchor: &Room, plan: HiddenPlan) {
    for pos in &plan.tiles {
        context.floor.map.carve(*pos);
    }

    let mut end_room = plan.end_room;
    context.rng.shuffle(&mut end_room);
    if let Some(&pos) = end_room.first() {
        let potion = random_potion(context.rng);
        context.floor.map.place_loot(pos, potion);
    }
    if let Some(&pos) = end_room.get(1) {
        let trap = random_trap(context.floor.number, context.rng);
        context.floor.map.place_trap(pos, Trap { hidden: true, ..trap });
    }

    context.floor.hidden_area =
        Some(HiddenArea { tiles: plan.tiles, false_walls: plan.false_walls, revealed: false });
    context.floor.mouse = random_free_cell(&context.floor, anchor, context.rng).map(|pos| Mouse { pos });
    debug!("floor {}: hidden area placed off room at ({}, {})", context.floor.number, anchor.x, anchor.y);
}
