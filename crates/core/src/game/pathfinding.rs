//! Deterministic 8-way movement primitives and the auto-walk path search.
//! This module exists so corner rules are shared by the player, enemies, and the mouse.
//! It does not own the auto-walk queue itself.

use std::collections::{BTreeMap, VecDeque};

use super::*;
use crate::floor::FloorState;

/// A diagonal step cuts a corner when either orthogonal neighbour it slips past is blocked.
pub(super) fn cuts_corner(from: Pos, direction: Direction, passable: impl Fn(Pos) -> bool) -> bool {
    if !direction.is_diagonal() {
        return false;
    }
    let (dx, dy) = direction.delta();
    !passable(from.offset(dx, 0)) || !passable(from.offset(0, dy))
}

/// Cells auto-walk may plan through or step onto: open, visible, and unoccupied.
pub(super) fn auto_walk_passable(floor: &FloorState, pos: Pos) -> bool {
    floor.is_walkable(pos) && !floor.hides(pos) && floor.enemy_at(pos).is_none()
}

/// Breadth-first search over open, visible, unoccupied cells, expanding neighbours in
/// `Direction::ALL` order so ties always resolve the same way.
pub fn find_path(floor: &FloorState, start: Pos, goal: Pos) -> Option<Vec<Direction>> {
    if start == goal {
        return Some(Vec::new());
    }
    if !auto_walk_passable(floor, goal) {
        return None;
    }

    let mut came_from: BTreeMap<Pos, (Pos, Direction)> = BTreeMap::new();
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if current == goal {
            return reconstruct(&came_from, start, goal);
        }
        for direction in Direction::ALL {
            let next = current.step(direction);
            if next == start || came_from.contains_key(&next) {
                continue;
            }
            if !auto_walk_passable(floor, next)
                || cuts_corner(current, direction, |pos| floor.is_walkable(pos) && !floor.hides(pos))
            {
                continue;
            }
            came_from.insert(next, (current, direction));
            queue.push_back(next);
        }
    }
    None
}

fn reconstruct(came_from: &BTreeMap<Pos, (Pos, Direction)>, start: Pos, goal: Pos) -> Option<Vec<Direction>> {
    let mut steps = Vec::new();
    let mut at = goal;
    while at != start {
        let (previous, direction) = *came_from.get(&at)?;
        steps.push(direction);
        at = previous;
    }
    steps.reverse();
    Some(steps)
}
